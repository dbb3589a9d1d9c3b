/// Application configuration
///
/// Fixed constants for the shop's folder conventions plus the small
/// `app_config.json` file that remembers the chosen base path between runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const APP_NAME: &str = "ExPresto";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file, resolved against the process working directory
pub const CONFIG_FILE: &str = "app_config.json";
/// Log file, resolved against the process working directory
pub const LOG_FILE: &str = "order_management.log";

pub const DEFAULT_BASE_PATH: &str = "orders";
pub const ORDER_FILE: &str = "orders.json";
/// Completed orders live here, directly under the base path
pub const ARCHIVE_DIR: &str = "_DONE";
/// Job sheets are written into this directory of the order folder
pub const JOB_SHEET_DIR: &str = "02_REFERENCES";

pub const MAX_ORDER_ID_LENGTH: usize = 50;
pub const MAX_COMMENTS_LENGTH: usize = 900;
/// Characters per line when wrapping comments on the job sheet
pub const COMMENT_WRAP_WIDTH: usize = 50;

/// Seconds before the success banner disappears
pub const BANNER_SECONDS: u64 = 3;
/// Number of orders listed under "Recent Activity"
pub const RECENT_ORDERS: usize = 5;

/// Folder template applied to every new order: category → subfolders
pub const SUBFOLDER_STRUCTURE: [(&str, [&str; 2]); 4] = [
    ("01_FROM_CLIENT", ["PDF", "Podklady"]),
    ("02_RESOURCES", ["Fonts", "Photos"]),
    ("03_DESIGN", ["Work_Files", "Stock_assets"]),
    ("04_EXPORT", ["Print_Ready", "Preview"]),
];

/// Persisted settings (`app_config.json`)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Root directory for order folders and `orders.json`
    pub base_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
        }
    }
}

impl AppConfig {
    /// Load the config file, falling back to defaults when it is missing
    /// or unreadable. Failures are logged, never returned.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable app config");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the config file, replacing any previous content
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), base_path = %self.base_path.display(), "Saved app config");
        Ok(())
    }

    /// Directory holding completed orders
    pub fn archive_dir(&self) -> PathBuf {
        self.base_path.join(ARCHIVE_DIR)
    }
}
