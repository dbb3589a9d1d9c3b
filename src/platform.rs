/// Host OS integration: folder picker and file browser
///
/// The core never calls these directly; `AppState` receives an
/// implementation so everything else runs headless in tests.

use rfd::FileDialog;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait PlatformServices {
    /// Ask the user for a directory. `None` when the dialog was cancelled.
    fn pick_directory(&self) -> Option<PathBuf>;

    /// Open `path` in the native file browser
    fn reveal_in_file_browser(&self, path: &Path) -> io::Result<()>;
}

/// Real dialogs and file browser of the running desktop
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePlatform;

impl PlatformServices for NativePlatform {
    fn pick_directory(&self) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().set_title("Select Orders Base Directory");
        if let Some(home) = dirs::home_dir() {
            dialog = dialog.set_directory(home);
        }
        dialog.pick_folder()
    }

    fn reveal_in_file_browser(&self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }

        // Spawned and left running; the browser outlives the call
        file_browser_command(path).spawn()?;
        Ok(())
    }
}

#[cfg(target_os = "windows")]
fn file_browser_command(path: &Path) -> Command {
    let mut cmd = Command::new("explorer");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "macos")]
fn file_browser_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn file_browser_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
