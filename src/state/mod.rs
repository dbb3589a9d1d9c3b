/// State management module
///
/// This module handles all application state, including:
/// - Order records and their JSON file (data.rs, store.rs)
/// - The In Progress / Completed state machine (lifecycle.rs)
/// - New-order form input and validation (form.rs)
/// - The per-session application state used by the UI (app.rs)

pub mod app;
pub mod data;
pub mod form;
pub mod lifecycle;
pub mod store;
