use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::data::{Order, OrderStats, OrderStatus};
use crate::config::ORDER_FILE;
use crate::error::StoreError;

/// Every order, keyed by id, mirrored to `<base_path>/orders.json`.
///
/// The store is the only owner of order records. Each mutation is followed
/// by a full rewrite of the file; there is no locking against other
/// processes, the last writer wins.
pub struct OrderStore {
    base_path: PathBuf,
    orders: BTreeMap<String, Order>,
}

impl OrderStore {
    /// Load the order file under `base_path`.
    ///
    /// A missing, unreadable or corrupt file yields an empty store. The
    /// cause is logged, never returned.
    pub fn load(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        let file = base_path.join(ORDER_FILE);

        let orders = if file.exists() {
            match Self::read_orders(&file) {
                Ok(orders) => orders,
                Err(e) => {
                    tracing::error!(path = %file.display(), error = %e, "Error loading orders, starting empty");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        tracing::info!(path = %file.display(), count = orders.len(), "Order store loaded");

        OrderStore { base_path, orders }
    }

    fn read_orders(file: &Path) -> Result<BTreeMap<String, Order>, Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(file)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write all orders as pretty-printed JSON, creating the base path if needed
    pub fn save(&self) -> Result<(), StoreError> {
        Self::write_orders(&self.base_path, &self.orders)
    }

    /// Write `orders` to the order file under `base_path`.
    ///
    /// The JSON goes to a temporary sibling first and is renamed over the
    /// old file, so a failed write never leaves a truncated `orders.json`.
    pub(crate) fn write_orders(
        base_path: &Path,
        orders: &BTreeMap<String, Order>,
    ) -> Result<(), StoreError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        fs::create_dir_all(base_path).map_err(io_err(base_path))?;

        let file = base_path.join(ORDER_FILE);
        let temp = file.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(orders)?;

        fs::write(&temp, json).map_err(io_err(&temp))?;
        fs::rename(&temp, &file).map_err(io_err(&file))?;

        tracing::debug!(path = %file.display(), count = orders.len(), "Orders saved");
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `orders.json`
    pub fn file_path(&self) -> PathBuf {
        self.base_path.join(ORDER_FILE)
    }

    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id)
    }

    pub fn contains(&self, order_id: &str) -> bool {
        self.orders.contains_key(order_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Orders in id order
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub(crate) fn orders(&self) -> &BTreeMap<String, Order> {
        &self.orders
    }

    /// Insert or replace a record and persist.
    ///
    /// The in-memory map only changes when the write succeeds.
    pub fn upsert(&mut self, order: Order) -> Result<(), StoreError> {
        let mut next = self.orders.clone();
        next.insert(order.order_id.clone(), order);
        self.replace_all(next)
    }

    /// Replace the whole mapping and persist, keeping the old mapping on failure
    pub(crate) fn replace_all(&mut self, orders: BTreeMap<String, Order>) -> Result<(), StoreError> {
        Self::write_orders(&self.base_path, &orders)?;
        self.orders = orders;
        Ok(())
    }

    /// Forget every record. Order folders stay on disk.
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let removed = self.orders.len();
        self.replace_all(BTreeMap::new())?;
        tracing::info!(removed, "Cleared order list");
        Ok(removed)
    }

    pub fn stats(&self) -> OrderStats {
        let completed = self.orders.values().filter(|o| o.is_completed()).count();
        OrderStats {
            total: self.orders.len(),
            in_progress: self.orders.len() - completed,
            completed,
        }
    }

    /// The `limit` most recently created orders, newest first
    pub fn recent(&self, limit: usize) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.values().collect();
        orders.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        orders.truncate(limit);
        orders
    }

    /// Orders whose status is one of `statuses`, in id order
    pub fn filtered(&self, statuses: &[OrderStatus]) -> Vec<&Order> {
        self.orders
            .values()
            .filter(|o| statuses.contains(&o.status))
            .collect()
    }

    /// Records whose folder is not where `folder_path` says.
    ///
    /// Nothing is repaired; this only makes a half-applied status change
    /// visible.
    pub fn drift(&self) -> Vec<&Order> {
        self.orders
            .values()
            .filter(|o| !o.folder_path.is_dir())
            .collect()
    }
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("base_path", &self.base_path)
            .field("orders", &self.orders.len())
            .finish()
    }
}
