/// Order folder tree
///
/// Every order gets the same directory skeleton under the base path:
/// the order root, then each category from `SUBFOLDER_STRUCTURE` with its
/// two subfolders.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SUBFOLDER_STRUCTURE;
use crate::error::LayoutError;

/// Create `<base_path>/<order_id>` and the template tree inside it.
///
/// Refuses when the order folder already exists. A failure halfway leaves
/// the directories created so far in place.
pub fn create_order_folders(order_id: &str, base_path: &Path) -> Result<PathBuf, LayoutError> {
    let root = base_path.join(order_id);
    if root.exists() {
        return Err(LayoutError::AlreadyExists {
            order_id: order_id.to_string(),
            path: root,
        });
    }

    for dir in template_dirs(&root) {
        if let Err(source) = fs::create_dir_all(&dir) {
            tracing::error!(path = %dir.display(), error = %source, "Folder creation stopped partway");
            return Err(LayoutError::Io { path: dir, source });
        }
    }

    tracing::info!(order_id, path = %root.display(), "Created order folder tree");
    Ok(root)
}

/// Directories to create for an order rooted at `root`, parents first
pub fn template_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![root.to_path_buf()];
    for (category, subfolders) in SUBFOLDER_STRUCTURE {
        let category_dir = root.join(category);
        dirs.push(category_dir.clone());
        dirs.extend(subfolders.iter().map(|sub| category_dir.join(sub)));
    }
    dirs
}
