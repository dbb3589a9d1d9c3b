/// Views for the three pages plus shared pieces
use iced::widget::{button, container, row, text};
use iced::{Alignment, Element, Theme};

use crate::{Message, Page};

pub mod dashboard;
pub mod manage;
pub mod new_order;

/// Horizontal navigation; the current page is highlighted
pub fn nav_bar<'a>(current: Page) -> Element<'a, Message> {
    let tab = |label: &'a str, page: Page| {
        let style: fn(&Theme, button::Status) -> button::Style = if page == current {
            button::primary
        } else {
            button::secondary
        };
        button(text(label).size(16))
            .on_press(Message::Navigate(page))
            .padding([8, 16])
            .style(style)
    };

    row![
        tab("Dashboard", Page::Dashboard),
        tab("New Order", Page::NewOrder),
        tab("Manage Orders", Page::ManageOrders),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// Rounded box used for stats and order cards
pub fn card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(20)
        .style(container::rounded_box)
        .into()
}
