use chrono::{Local, Timelike};
use std::fs;
use std::path::{Path, PathBuf};

use super::data::{Order, OrderStats, OrderStatus};
use super::form::NewOrder;
use super::lifecycle;
use super::store::OrderStore;
use crate::config::{AppConfig, ARCHIVE_DIR, RECENT_ORDERS};
use crate::error::{AppError, ValidationError};
use crate::job_sheet;
use crate::layout;
use crate::platform::PlatformServices;

/// Transient success message with the id of the timer that may dismiss it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub generation: u64,
}

/// Everything one running session needs: config, orders and OS hooks.
///
/// Each UI handler calls exactly one method; there is no other shared state.
pub struct AppState {
    config_path: PathBuf,
    config: AppConfig,
    store: OrderStore,
    platform: Box<dyn PlatformServices>,
    banner: Option<Banner>,
    banner_generation: u64,
}

impl AppState {
    /// Read `config_path` and load the orders under its base path
    pub fn new(config_path: impl Into<PathBuf>, platform: Box<dyn PlatformServices>) -> Self {
        let config_path = config_path.into();
        let config = AppConfig::load(&config_path);
        let store = OrderStore::load(&config.base_path);

        for order in store.drift() {
            tracing::warn!(
                order_id = %order.order_id,
                folder = %order.folder_path.display(),
                "Order folder not found where the record says"
            );
        }

        AppState {
            config_path,
            config,
            store,
            platform,
            banner: None,
            banner_generation: 0,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn stats(&self) -> OrderStats {
        self.store.stats()
    }

    pub fn recent(&self) -> Vec<&Order> {
        self.store.recent(RECENT_ORDERS)
    }

    pub fn filtered(&self, statuses: &[OrderStatus]) -> Vec<&Order> {
        self.store.filtered(statuses)
    }

    /// Create folders, job sheet and record for a validated request.
    ///
    /// Nothing is recorded unless the job sheet was written. Folders created
    /// before a later failure stay on disk.
    pub fn create_order(&mut self, request: NewOrder) -> Result<Order, AppError> {
        if self.store.contains(request.order_id()) {
            return Err(ValidationError::DuplicateId(request.order_id().to_string()).into());
        }

        let folder = layout::create_order_folders(request.order_id(), self.base_path())?;
        self.reveal(&folder);

        // orders.json keeps whole seconds only
        let now = Local::now().naive_local();
        let order = Order {
            order_id: request.order_id().to_string(),
            comments: request.comments().to_string(),
            status: OrderStatus::InProgress,
            folder_path: folder,
            created_date: now.with_nanosecond(0).unwrap_or(now),
            width: request.width(),
            height: request.height(),
            safe_zone: request.safe_zone(),
        };

        let sheet = job_sheet::job_sheet_path(&order.folder_path, &order.order_id);
        job_sheet::generate_job_sheet(&order, &sheet, order.width, order.height, order.safe_zone)?;

        self.store.upsert(order.clone())?;
        tracing::info!(order_id = %order.order_id, "Order created");
        Ok(order)
    }

    /// Move an order to `target`, see [`lifecycle::transition`]
    pub fn set_status(&mut self, order_id: &str, target: OrderStatus) -> Result<PathBuf, AppError> {
        Ok(lifecycle::transition(&mut self.store, order_id, target)?)
    }

    pub fn complete(&mut self, order_id: &str) -> Result<PathBuf, AppError> {
        Ok(lifecycle::complete(&mut self.store, order_id)?)
    }

    pub fn revert(&mut self, order_id: &str) -> Result<PathBuf, AppError> {
        Ok(lifecycle::revert(&mut self.store, order_id)?)
    }

    /// Forget every record, leaving folders on disk
    pub fn clear_orders(&mut self) -> Result<usize, AppError> {
        Ok(self.store.clear()?)
    }

    /// Open an order's folder in the file browser
    pub fn open_folder(&self, order_id: &str) -> bool {
        match self.store.get(order_id) {
            Some(order) => self.reveal(&order.folder_path),
            None => false,
        }
    }

    fn reveal(&self, path: &Path) -> bool {
        match self.platform.reveal_in_file_browser(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Error opening file explorer");
                false
            }
        }
    }

    /// Ask for a new base path. `Ok(None)` when the picker was cancelled.
    pub fn browse_base_path(&mut self) -> Result<Option<PathBuf>, AppError> {
        match self.platform.pick_directory() {
            Some(dir) => {
                self.change_base_path(dir.clone())?;
                Ok(Some(dir))
            }
            None => Ok(None),
        }
    }

    /// Switch to `base_path`: create it and its archive, remember it in the
    /// config file and reload orders from there.
    pub fn change_base_path(&mut self, base_path: PathBuf) -> Result<(), AppError> {
        let archive = base_path.join(ARCHIVE_DIR);
        fs::create_dir_all(&archive).map_err(|source| AppError::BasePath {
            path: archive.clone(),
            source,
        })?;

        let config = AppConfig { base_path };
        config.save(&self.config_path)?;

        self.store = OrderStore::load(&config.base_path);
        tracing::info!(base_path = %config.base_path.display(), orders = self.store.len(), "Base path changed");
        self.config = config;
        Ok(())
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Show `message` and return the generation to pass to `dismiss_banner`
    pub fn show_success(&mut self, message: impl Into<String>) -> u64 {
        self.banner_generation += 1;
        self.banner = Some(Banner {
            message: message.into(),
            generation: self.banner_generation,
        });
        self.banner_generation
    }

    /// Hide the banner if it is still the one from `generation`
    pub fn dismiss_banner(&mut self, generation: u64) {
        if self.banner.as_ref().map(|b| b.generation) == Some(generation) {
            self.banner = None;
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config_path", &self.config_path)
            .field("config", &self.config)
            .field("store", &self.store)
            .field("banner", &self.banner)
            .finish()
    }
}
