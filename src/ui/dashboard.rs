/// Dashboard: statistics, recent activity and the base path setting
use iced::widget::{button, column, row, text, Column};
use iced::{Alignment, Element, Length};

use expresto::AppState;

use super::card;
use crate::Message;

pub fn view(state: &AppState) -> Element<'_, Message> {
    let stats = state.stats();

    let stat = |value: usize, label: &'static str| {
        card(
            column![text(value.to_string()).size(36), text(label)]
                .spacing(4)
                .align_x(Alignment::Center),
        )
    };

    let stats_row = row![
        stat(stats.total, "Total Orders"),
        stat(stats.in_progress, "In Progress"),
        stat(stats.completed, "Completed"),
    ]
    .spacing(20);

    let mut recent = Column::new().spacing(10);
    for order in state.recent() {
        recent = recent.push(card(
            column![
                text(order.order_id.as_str()).size(20),
                text(format!("Status: {}", order.status)),
                text(format!("Created: {}", order.created_label())),
            ]
            .spacing(4),
        ));
    }

    let settings = row![
        text(format!("Current Base Path: {}", state.base_path().display())).width(Length::Fill),
        button("Browse").on_press(Message::BrowseBasePath).padding(10),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut content = column![text("Order Statistics").size(24), stats_row].spacing(20);
    if !state.store().is_empty() {
        content = content.push(text("Recent Activity").size(24)).push(recent);
    }

    content
        .push(text("Settings").size(24))
        .push(settings)
        .into()
}
