// Logging module - tracing subscriber setup
//
// Human-readable logs go to stdout. When file logging is enabled, a second
// layer writes JSON lines through a non-blocking rolling appender; the
// returned guard must live until shutdown so buffered lines get flushed.
//
// Precedence: RUST_LOG env var > config file level > "info"

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber
///
/// Returns the file writer guard when file logging is active. If the log
/// directory cannot be created, falls back to stdout only.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let stdout = tracing_subscriber::fmt::layer().with_target(false);

    if !config.file_enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(stdout)
            .init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.file_dir, e
        );
        tracing_subscriber::registry()
            .with(filter)
            .with(stdout)
            .init();
        return None;
    }

    let appender = config
        .file_rotation
        .appender(&config.file_dir, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}
