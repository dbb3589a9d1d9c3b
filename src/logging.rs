/// Logging setup: stdout plus an append-only log file
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// When the log file cannot be opened, logging continues on stdout only.
pub fn init(log_file: &Path) {
    let file_layer = match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(e) => {
            eprintln!("⚠️  Cannot open log file {}: {}", log_file.display(), e);
            None
        }
    };

    let result = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "expresto=info".into()))
        .with(fmt::layer())
        .with(file_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("⚠️  Logging already initialized: {}", e);
    }
}
