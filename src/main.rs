use iced::widget::{column, container, text, Column};
use iced::{Element, Length, Task, Theme};
use std::path::Path;
use std::time::Duration;

use expresto::config::{APP_NAME, APP_VERSION, BANNER_SECONDS, CONFIG_FILE, LOG_FILE};
use expresto::platform::NativePlatform;
use expresto::state::form::OrderForm;
use expresto::{AppError, AppState, OrderStatus};

mod ui;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    NewOrder,
    ManageOrders,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Page),
    /// User clicked "Browse" next to the base path
    BrowseBasePath,
    OrderIdChanged(String),
    WidthChanged(String),
    HeightChanged(String),
    SafeZoneChanged(String),
    CommentsChanged(String),
    SubmitOrder,
    /// Completed checkbox of an order card
    ToggleCompleted(String, bool),
    OpenFolder(String),
    FilterChanged(OrderStatus, bool),
    ClearRequested,
    ClearConfirmed,
    ClearCancelled,
    /// Timer for the success banner with the given generation fired
    DismissBanner(u64),
}

/// Main application state
struct ExPresto {
    /// Orders, config and OS hooks
    state: AppState,
    page: Page,
    form: OrderForm,
    /// Statuses shown on the Manage Orders page
    filter: Vec<OrderStatus>,
    confirm_clear: bool,
    /// Last failure, shown until the next action
    error: Option<String>,
}

impl ExPresto {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let state = AppState::new(CONFIG_FILE, Box::new(NativePlatform));

        tracing::info!(
            base_path = %state.base_path().display(),
            orders = state.store().len(),
            "{} v{} initialized",
            APP_NAME,
            APP_VERSION
        );

        (
            ExPresto {
                state,
                page: Page::Dashboard,
                form: OrderForm::default(),
                filter: OrderStatus::ALL.to_vec(),
                confirm_clear: false,
                error: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::DismissBanner(_)) {
            self.error = None;
        }

        match message {
            Message::Navigate(page) => {
                self.page = page;
                self.confirm_clear = false;
                Task::none()
            }
            Message::BrowseBasePath => match self.state.browse_base_path() {
                Ok(Some(dir)) => self.success(format!("Base path updated to: {}", dir.display())),
                Ok(None) => Task::none(),
                Err(e) => self.fail("Error selecting base path", e),
            },
            Message::OrderIdChanged(value) => {
                self.form.order_id = value;
                Task::none()
            }
            Message::WidthChanged(value) => {
                self.form.width = value;
                Task::none()
            }
            Message::HeightChanged(value) => {
                self.form.height = value;
                Task::none()
            }
            Message::SafeZoneChanged(value) => {
                self.form.safe_zone = value;
                Task::none()
            }
            Message::CommentsChanged(value) => {
                self.form.comments = value;
                Task::none()
            }
            Message::SubmitOrder => {
                let result = self
                    .form
                    .validate()
                    .map_err(AppError::from)
                    .and_then(|request| self.state.create_order(request));

                match result {
                    Ok(order) => {
                        self.form.reset();
                        self.success(format!("Order {} created successfully", order.order_id))
                    }
                    Err(e) => self.fail("Error creating order", e),
                }
            }
            Message::ToggleCompleted(order_id, completed) => {
                let target = if completed {
                    OrderStatus::Completed
                } else {
                    OrderStatus::InProgress
                };

                match self.state.set_status(&order_id, target) {
                    Ok(_) if completed => {
                        self.success(format!("Order {} marked as completed", order_id))
                    }
                    Ok(_) => self.success(format!("Order {} moved back to in-progress", order_id)),
                    Err(e) => self.fail("Error changing order status", e),
                }
            }
            Message::OpenFolder(order_id) => {
                if !self.state.open_folder(&order_id) {
                    self.error = Some("Failed to open file explorer".to_string());
                }
                Task::none()
            }
            Message::FilterChanged(status, shown) => {
                self.filter.retain(|s| *s != status);
                if shown {
                    self.filter.push(status);
                }
                self.filter.sort_by_key(|s| *s == OrderStatus::Completed);
                Task::none()
            }
            Message::ClearRequested => {
                self.confirm_clear = true;
                Task::none()
            }
            Message::ClearCancelled => {
                self.confirm_clear = false;
                Task::none()
            }
            Message::ClearConfirmed => {
                self.confirm_clear = false;
                match self.state.clear_orders() {
                    Ok(_) => self.success("All orders have been cleared from the list"),
                    Err(e) => self.fail("Error clearing orders", e),
                }
            }
            Message::DismissBanner(generation) => {
                self.state.dismiss_banner(generation);
                Task::none()
            }
        }
    }

    /// Show the success banner and schedule its removal
    fn success(&mut self, message: impl Into<String>) -> Task<Message> {
        let generation = self.state.show_success(message);
        Task::perform(
            tokio::time::sleep(Duration::from_secs(BANNER_SECONDS)),
            move |_| Message::DismissBanner(generation),
        )
    }

    fn fail(&mut self, context: &str, error: AppError) -> Task<Message> {
        tracing::error!(kind = ?error.kind(), error = %error, "{}", context);
        self.error = Some(error.user_message());
        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page: Element<Message> = match self.page {
            Page::Dashboard => ui::dashboard::view(&self.state),
            Page::NewOrder => ui::new_order::view(&self.form),
            Page::ManageOrders => ui::manage::view(&self.state, &self.filter, self.confirm_clear),
        };

        let content: Column<Message> = column![
            text(format!("🎨 {}", APP_NAME)).size(40),
            ui::nav_bar(self.page),
        ]
        .push_maybe(
            self.state
                .banner()
                .map(|banner| text(format!("✨ {}", banner.message)).style(text::success)),
        )
        .push_maybe(self.error.as_ref().map(|e| text(e.as_str()).style(text::danger)))
        .push(page)
        .spacing(20)
        .padding(40);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    expresto::logging::init(Path::new(LOG_FILE));

    iced::application(APP_NAME, ExPresto::update, ExPresto::view)
        .theme(ExPresto::theme)
        .centered()
        .run_with(ExPresto::new)
}
