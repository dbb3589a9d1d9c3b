//! ExPresto: order tracking for a small print and design shop.
//!
//! Each order gets a folder tree under the base path and a one-page PDF job
//! sheet. Completing an order moves its folder into `_DONE`; reverting moves
//! it back. Records live in `<base_path>/orders.json`.

pub mod config;
pub mod error;
pub mod job_sheet;
pub mod layout;
pub mod logging;
pub mod platform;
pub mod state;

pub use error::{AppError, ErrorKind};
pub use state::app::AppState;
pub use state::data::{Order, OrderStatus};
