use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

/// Initialize tracing with bracketed formatting on stdout and, when the
/// `logs/` directory can be created, a timestamped log file next to it.
/// Returns the log file path if one was opened.
pub fn setup_logging() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(std::io::stdout);

    let file_layer_and_path = open_log_file().map(|(file, path)| {
        let layer = fmt::layer()
            .event_format(BracketedFormatter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false);
        (layer, path)
    });

    match file_layer_and_path {
        Some((file_layer, path)) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();
            info!("Log file created at: {:?}", path);
            Some(path)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .init();
            warn!("Could not open a log file, logging to stdout only");
            None
        }
    }
}

fn open_log_file() -> Option<(fs::File, PathBuf)> {
    let log_dir = std::env::current_dir().ok()?.join("logs");
    fs::create_dir_all(&log_dir).ok()?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("prepare_gesture_dataset_{}.log", timestamp));

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
        .ok()?;

    Some((file, log_path))
}
