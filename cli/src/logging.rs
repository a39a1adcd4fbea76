use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes logging for the application.
///
/// Sets up two logging outputs:
/// - Console: compact human-readable format on stderr, so command output on stdout
///   stays clean
/// - File: JSON format in the application data directory under `logs/`, rotated daily
///
/// The default filter can be overridden with RUST_LOG:
/// - RUST_LOG=debug perfume-catalog list
/// - RUST_LOG=service=trace,catalog_client=debug perfume-catalog list
///
/// Returns a guard that must be kept alive for the duration of the program.
/// Dropping this guard will cause file logging to stop.
pub fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = file_system::get_log_dir().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to create log directory: {}", e);
        eprintln!("Logs will be written to the current directory.");
        PathBuf::from(".")
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "perfume-catalog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_file(true)
        .with_line_number(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,service=info,catalog_client=info,favorites_storage=info")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!(log_dir = %log_dir.display(), "Logging initialized");

    guard
}
