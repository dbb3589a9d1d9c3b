/// Order state machine
///
/// `In Progress` orders live directly under the base path, `Completed`
/// orders under `<base_path>/_DONE`. A transition moves the folder first and
/// then rewrites `orders.json`; if that write fails the folder stays moved
/// and the record keeps its old status and path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::data::OrderStatus;
use super::store::OrderStore;
use crate::error::LifecycleError;

/// Mark an order completed and move its folder into the archive.
/// Returns the new folder location.
pub fn complete(store: &mut OrderStore, order_id: &str) -> Result<PathBuf, LifecycleError> {
    transition(store, order_id, OrderStatus::Completed)
}

/// Move a completed order back under the base path
pub fn revert(store: &mut OrderStore, order_id: &str) -> Result<PathBuf, LifecycleError> {
    transition(store, order_id, OrderStatus::InProgress)
}

/// Move `order_id` to `target`, relocating its folder and persisting the store
pub fn transition(
    store: &mut OrderStore,
    order_id: &str,
    target: OrderStatus,
) -> Result<PathBuf, LifecycleError> {
    let order = store
        .get(order_id)
        .ok_or_else(|| LifecycleError::NotFound(order_id.to_string()))?;

    if order.status == target {
        return Err(LifecycleError::AlreadyInStatus {
            order_id: order_id.to_string(),
            status: target,
        });
    }

    let source = order.folder_path.clone();
    if !source.is_dir() {
        return Err(LifecycleError::FolderMissing(source));
    }

    let dest_dir = target.home_dir(store.base_path());
    if !dest_dir.exists() {
        fs::create_dir_all(&dest_dir).map_err(|source| LifecycleError::Archive {
            path: dest_dir.clone(),
            source,
        })?;
    }

    // Folder keeps its own name; the order id is only the default
    let folder_name = source
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| order_id.into());
    let dest = dest_dir.join(folder_name);
    if dest.exists() {
        return Err(LifecycleError::DestinationOccupied(dest));
    }

    move_dir(&source, &dest).map_err(|e| LifecycleError::Move {
        from: source.clone(),
        to: dest.clone(),
        source: e,
    })?;

    let mut orders = store.orders().clone();
    if let Some(record) = orders.get_mut(order_id) {
        record.status = target;
        record.folder_path = dest.clone();
    }

    if let Err(e) = store.replace_all(orders) {
        tracing::error!(
            order_id,
            moved_to = %dest.display(),
            error = %e,
            "Folder moved but order file not updated; manual correction required"
        );
        return Err(LifecycleError::Persist {
            moved_to: dest,
            source: e,
        });
    }

    tracing::info!(order_id, status = %target, path = %dest.display(), "Order status changed");
    Ok(dest)
}

/// Rename `source` to `dest`, copying when they are on different filesystems
fn move_dir(source: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(source, dest) {
        Err(e) if is_cross_device(&e) => {
            tracing::debug!(from = %source.display(), to = %dest.display(), "Rename crosses filesystems, copying");
            copy_then_remove(source, dest)
        }
        other => other,
    }
}

#[cfg(windows)]
fn is_cross_device(e: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}

#[cfg(not(windows))]
fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV
    e.raw_os_error() == Some(18)
}

/// Copy the whole tree to `dest`, then delete `source`.
///
/// If copying fails the partial copy is removed and `source` is untouched.
fn copy_then_remove(source: &Path, dest: &Path) -> io::Result<()> {
    if let Err(e) = copy_tree(source, dest) {
        if let Err(cleanup) = fs::remove_dir_all(dest) {
            tracing::warn!(path = %dest.display(), error = %cleanup, "Could not remove partial copy");
        }
        return Err(e);
    }
    fs::remove_dir_all(source)
}

fn copy_tree(source: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::tests::order;
    use std::path::Path;
    use tempfile::TempDir;

    fn store_with(base: &Path, id: &str, status: OrderStatus) -> OrderStore {
        let mut store = OrderStore::load(base);
        let o = order(id, "2024-01-01 10:00:00", status, base);
        fs::create_dir_all(o.folder_path.join("03_DESIGN")).unwrap();
        store.upsert(o).unwrap();
        store
    }

    #[test]
    fn test_complete_moves_into_archive() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        let mut store = store_with(base, "JOB-42", OrderStatus::InProgress);

        let dest = complete(&mut store, "JOB-42").unwrap();

        assert_eq!(dest, base.join("_DONE").join("JOB-42"));
        assert!(!base.join("JOB-42").exists());
        assert!(dest.join("03_DESIGN").is_dir());

        let record = store.get("JOB-42").unwrap();
        assert_eq!(record.status, OrderStatus::Completed);
        assert_eq!(record.folder_path, dest);

        let on_disk = OrderStore::load(base);
        assert_eq!(on_disk.get("JOB-42").unwrap().status, OrderStatus::Completed);
    }

    #[test]
    fn test_revert_after_complete() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        let mut store = store_with(base, "JOB-42", OrderStatus::InProgress);

        complete(&mut store, "JOB-42").unwrap();
        let dest = revert(&mut store, "JOB-42").unwrap();

        assert_eq!(dest, base.join("JOB-42"));
        assert!(dest.is_dir());
        assert!(!base.join("_DONE").join("JOB-42").exists());
        assert_eq!(store.get("JOB-42").unwrap().status, OrderStatus::InProgress);
    }

    #[test]
    fn test_missing_folder_is_error_and_file_untouched() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        let mut store = store_with(base, "JOB-42", OrderStatus::InProgress);
        fs::remove_dir_all(base.join("JOB-42")).unwrap();
        let before = fs::read(store.file_path()).unwrap();

        let err = complete(&mut store, "JOB-42").unwrap_err();

        assert!(matches!(err, LifecycleError::FolderMissing(_)));
        assert_eq!(store.get("JOB-42").unwrap().status, OrderStatus::InProgress);
        assert_eq!(fs::read(store.file_path()).unwrap(), before);
    }

    #[test]
    fn test_unknown_order() {
        let dir = TempDir::new().unwrap();
        let mut store = OrderStore::load(dir.path());

        assert!(matches!(
            revert(&mut store, "nope"),
            Err(LifecycleError::NotFound(_))
        ));
    }

    #[test]
    fn test_same_status_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(dir.path(), "A", OrderStatus::InProgress);

        assert!(matches!(
            revert(&mut store, "A"),
            Err(LifecycleError::AlreadyInStatus { .. })
        ));
        assert!(dir.path().join("A").is_dir());
    }

    #[test]
    fn test_occupied_destination() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        let mut store = store_with(base, "A", OrderStatus::InProgress);
        fs::create_dir_all(base.join("_DONE").join("A")).unwrap();

        let err = complete(&mut store, "A").unwrap_err();

        assert!(matches!(err, LifecycleError::DestinationOccupied(_)));
        assert!(base.join("A").is_dir());
        assert_eq!(store.get("A").unwrap().status, OrderStatus::InProgress);
    }

    #[test]
    fn test_revert_uses_current_base_path() {
        let dir = TempDir::new().unwrap();
        let old_base = dir.path().join("old");
        let new_base = dir.path().join("new");

        // Completed under the old base, store now lives under the new one
        let mut store = OrderStore::load(&new_base);
        let mut o = order("C", "2024-01-01 10:00:00", OrderStatus::Completed, &new_base);
        o.folder_path = old_base.join("_DONE").join("C");
        fs::create_dir_all(o.folder_path.join("03_DESIGN")).unwrap();
        store.upsert(o).unwrap();

        let dest = revert(&mut store, "C").unwrap();

        assert_eq!(dest, new_base.join("C"));
        assert!(dest.join("03_DESIGN").is_dir());
        assert!(!old_base.join("_DONE").join("C").exists());
        assert!(!old_base.join("C").exists());
        assert_eq!(store.get("C").unwrap().folder_path, dest);
    }

    #[test]
    fn test_cross_device_error_detected() {
        let code = if cfg!(windows) { 17 } else { 18 };
        assert!(is_cross_device(&io::Error::from_raw_os_error(code)));
        assert!(!is_cross_device(&io::Error::from(io::ErrorKind::NotFound)));
    }

    #[test]
    fn test_copy_then_remove_moves_tree() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("JOB-7");
        let dest = dir.path().join("_DONE").join("JOB-7");
        fs::create_dir_all(source.join("02_REFERENCES")).unwrap();
        fs::create_dir_all(source.join("01_SOURCE_FILES").join("Images")).unwrap();
        fs::write(source.join("02_REFERENCES").join("JOB-7_job_sheet.pdf"), b"%PDF").unwrap();
        fs::create_dir_all(dest.parent().unwrap()).unwrap();

        copy_then_remove(&source, &dest).unwrap();

        assert!(!source.exists());
        assert!(dest.join("01_SOURCE_FILES").join("Images").is_dir());
        assert_eq!(
            fs::read(dest.join("02_REFERENCES").join("JOB-7_job_sheet.pdf")).unwrap(),
            b"%PDF"
        );
    }

    #[test]
    fn test_failed_copy_keeps_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("JOB-8");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("notes.txt"), b"keep").unwrap();
        // Parent of the destination is a file, so nothing can be created there
        fs::write(dir.path().join("blocker"), b"").unwrap();
        let dest = dir.path().join("blocker").join("JOB-8");

        assert!(copy_then_remove(&source, &dest).is_err());
        assert_eq!(fs::read(source.join("notes.txt")).unwrap(), b"keep");
    }

    #[test]
    fn test_persist_failure_leaves_record_stale() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        let mut store = store_with(base, "JOB-9", OrderStatus::InProgress);
        // A directory squatting on the temp file name makes the write fail
        fs::create_dir(base.join("orders.json.tmp")).unwrap();

        let err = complete(&mut store, "JOB-9").unwrap_err();

        assert!(matches!(err, LifecycleError::Persist { .. }));
        assert!(base.join("_DONE").join("JOB-9").is_dir());
        let record = store.get("JOB-9").unwrap();
        assert_eq!(record.status, OrderStatus::InProgress);
        assert_eq!(record.folder_path, base.join("JOB-9"));
        assert!(store.drift().iter().any(|o| o.order_id == "JOB-9"));
    }
}
