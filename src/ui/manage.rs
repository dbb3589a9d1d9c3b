/// Order list with status toggles, filter and "Clear All"
use iced::widget::{button, checkbox, column, row, scrollable, text, Column};
use iced::{Alignment, Element};

use expresto::{AppState, Order, OrderStatus};

use super::card;
use crate::Message;

pub fn view<'a>(
    state: &'a AppState,
    filter: &[OrderStatus],
    confirm_clear: bool,
) -> Element<'a, Message> {
    if state.store().is_empty() {
        return text("No orders available").into();
    }

    let clear: Element<Message> = if confirm_clear {
        column![
            text("Are you sure you want to clear all orders? Folders stay on disk."),
            row![
                button("Yes, Clear All")
                    .on_press(Message::ClearConfirmed)
                    .style(button::danger),
                button("Cancel")
                    .on_press(Message::ClearCancelled)
                    .style(button::secondary),
            ]
            .spacing(10),
        ]
        .spacing(10)
        .into()
    } else {
        button("Clear All Orders")
            .on_press(Message::ClearRequested)
            .style(button::danger)
            .into()
    };

    let filters = OrderStatus::ALL.iter().fold(
        row![text("Filter by Status:")].spacing(20).align_y(Alignment::Center),
        |filters, &status| {
            filters.push(
                checkbox(status.label(), filter.contains(&status))
                    .on_toggle(move |shown| Message::FilterChanged(status, shown)),
            )
        },
    );

    let orders = state.filtered(filter);
    let list: Element<Message> = if orders.is_empty() {
        text("No orders match the selected filters").into()
    } else {
        let cards = orders.into_iter().map(order_card);
        scrollable(Column::with_children(cards).spacing(12)).into()
    };

    column![clear, filters, list].spacing(20).into()
}

fn order_card(order: &Order) -> Element<'_, Message> {
    let id = order.order_id.clone();
    let open_id = order.order_id.clone();

    let details = column![
        text(format!("Order: {}", order.order_id)).size(20),
        text(format!("Status: {}", order.status)),
        text(format!("Created: {}", order.created_label())),
        text(format!(
            "Dimensions: {} (Safe Zone: {}mm)",
            order.dimensions_label(),
            order.safe_zone
        )),
    ]
    .spacing(4)
    .push_maybe(
        (!order.comments.is_empty()).then(|| text(format!("Comments: {}", order.comments))),
    );

    let actions = row![
        checkbox("Completed", order.is_completed())
            .on_toggle(move |checked| Message::ToggleCompleted(id.clone(), checked)),
        button("📁 Open Folder").on_press(Message::OpenFolder(open_id)),
    ]
    .spacing(20)
    .align_y(Alignment::Center);

    card(column![details, actions].spacing(12))
}
