//! Structured Logger
//!
//! Wraps `tracing` to provide console output, optional JSON file rotation
//! (NDJSON), and environment-based level control.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger.
///
/// `RUST_LOG` wins over `level` when set. With a `log_dir`, a daily-rotated
/// JSON log `file_name.YYYY-MM-DD` is written alongside the console output.
pub fn init_logger(level: &str, log_dir: Option<&Path>, file_name: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = log_dir.map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, file_name);
        fmt::layer().json().with_writer(file_appender).with_ansi(false)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
