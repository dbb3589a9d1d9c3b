/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// `orders.json`, the filesystem operations and the UI layer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ARCHIVE_DIR;

/// Format of `created_date` in `orders.json`
pub const CREATED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where an order is in its lifecycle
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 2] = [OrderStatus::InProgress, OrderStatus::Completed];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Completed => "Completed",
        }
    }

    /// Directory an order folder with this status belongs in
    pub fn home_dir(self, base_path: &Path) -> PathBuf {
        match self {
            OrderStatus::InProgress => base_path.to_path_buf(),
            OrderStatus::Completed => base_path.join(ARCHIVE_DIR),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single print order
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    /// User-supplied id, also the order's folder name
    pub order_id: String,
    /// Free text, may be empty
    pub comments: String,
    pub status: OrderStatus,
    /// Current location of the order folder; follows `status`
    pub folder_path: PathBuf,
    #[serde(with = "created_date")]
    pub created_date: NaiveDateTime,
    /// Width in millimetres
    pub width: f64,
    /// Height in millimetres
    pub height: f64,
    /// Safe zone inset in millimetres
    pub safe_zone: f64,
}

impl Order {
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// `created_date` as written to `orders.json`
    pub fn created_label(&self) -> String {
        self.created_date.format(CREATED_DATE_FORMAT).to_string()
    }

    /// e.g. "200mm x 150mm"
    pub fn dimensions_label(&self) -> String {
        format!("{}mm x {}mm", self.width, self.height)
    }
}

mod created_date {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::CREATED_DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(CREATED_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, CREATED_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Order counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
}
