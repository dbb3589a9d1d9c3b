/// "Create New Order" form
use iced::widget::{button, column, row, text, text_input};
use iced::Element;

use expresto::config::{MAX_COMMENTS_LENGTH, MAX_ORDER_ID_LENGTH};
use expresto::state::form::OrderForm;

use crate::Message;

pub fn view(form: &OrderForm) -> Element<'_, Message> {
    let field = |label: &'static str, value: &str, on_input: fn(String) -> Message| {
        column![
            text(label),
            text_input(label, value)
                .on_input(on_input)
                .on_submit(Message::SubmitOrder)
                .padding(10),
        ]
        .spacing(6)
    };

    let dimensions = row![
        field("Width (mm)", &form.width, Message::WidthChanged),
        field("Height (mm)", &form.height, Message::HeightChanged),
        field("Safe Zone (mm)", &form.safe_zone, Message::SafeZoneChanged),
    ]
    .spacing(20);

    column![
        text("Create New Order").size(24),
        field("Order ID", &form.order_id, Message::OrderIdChanged),
        text(format!(
            "Unique identifier, at most {} characters",
            MAX_ORDER_ID_LENGTH
        ))
        .size(12),
        dimensions,
        field("Comments", &form.comments, Message::CommentsChanged),
        text(format!(
            "{}/{} characters",
            form.comments.chars().count(),
            MAX_COMMENTS_LENGTH
        ))
        .size(12),
        button("Create Order")
            .on_press(Message::SubmitOrder)
            .padding(10),
    ]
    .spacing(16)
    .into()
}
