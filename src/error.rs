/// Error types for every component
///
/// Each component returns its own error enum; `AppError` wraps them for the
/// UI, which only needs to know whether the user can fix the problem
/// (`ErrorKind::UserInput`) or the environment failed (`ErrorKind::Environment`).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::state::data::OrderStatus;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisting `orders.json` failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot write order file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize orders: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected form input. Nothing has been touched on disk when one of these
/// is returned.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Order ID is required")]
    EmptyId,

    #[error("Order ID must be at most {max} characters")]
    IdTooLong { max: usize },

    #[error("Order ID {0:?} cannot be used as a folder name")]
    IdNotFolderSafe(String),

    #[error("Order ID {0} already exists")]
    DuplicateId(String),

    #[error("Comments must be at most {max} characters")]
    CommentsTooLong { max: usize },

    #[error("Width and height must be positive numbers")]
    NonPositiveDimensions,

    #[error("Safe zone must be positive")]
    NonPositiveSafeZone,

    #[error("Safe zone too large for given dimensions")]
    SafeZoneTooLarge,

    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Folder already exists for order {order_id}")]
    AlreadyExists { order_id: String, path: PathBuf },

    #[error("cannot create folder {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum JobSheetError {
    #[error("cannot write job sheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot render job sheet: {0}")]
    Render(String),
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Order {0} not found")]
    NotFound(String),

    #[error("Order {order_id} is already {status}")]
    AlreadyInStatus { order_id: String, status: OrderStatus },

    #[error("Source folder not found: {0}")]
    FolderMissing(PathBuf),

    #[error("Destination already exists: {0}")]
    DestinationOccupied(PathBuf),

    #[error("cannot move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create archive directory {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The folder was moved but `orders.json` still records the old state
    #[error("folder moved to {moved_to} but the order file was not updated: {source}")]
    Persist {
        moved_to: PathBuf,
        #[source]
        source: StoreError,
    },
}

/// Error taxonomy shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user can correct the input and retry
    UserInput,
    /// Disk, permissions or external changes; logged and reported generically
    Environment,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    JobSheet(#[from] JobSheetError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot prepare base path {path}: {source}")]
    BasePath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::UserInput,
            AppError::Layout(LayoutError::AlreadyExists { .. }) => ErrorKind::UserInput,
            AppError::Lifecycle(LifecycleError::NotFound(_))
            | AppError::Lifecycle(LifecycleError::AlreadyInStatus { .. }) => ErrorKind::UserInput,
            _ => ErrorKind::Environment,
        }
    }

    /// Text for the on-screen notice
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::UserInput => self.to_string(),
            ErrorKind::Environment => match self {
                AppError::Lifecycle(LifecycleError::FolderMissing(path)) => {
                    format!("Source folder not found: {}", path.display())
                }
                AppError::Lifecycle(LifecycleError::Persist { moved_to, .. }) => format!(
                    "Folder moved to {} but the order file could not be saved. Fix orders.json manually.",
                    moved_to.display()
                ),
                _ => "Operation failed. See order_management.log for details.".to_string(),
            },
        }
    }
}
