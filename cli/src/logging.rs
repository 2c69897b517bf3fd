//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/bosswatch/bosswatch.log` (or platform
//! equivalent) with 10 MB size-based rotation. Set `BOSSWATCH_DEBUG=1` to
//! enable debug output for bosswatch crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize logging with dual-output (file + stderr).
///
/// Returns a `WorkerGuard` that MUST be held for the application lifetime
/// to ensure all buffered logs are flushed on shutdown.
///
/// # Behavior
/// - **File output:** INFO+ level, DEBUG+ for bosswatch crates when
///   `BOSSWATCH_DEBUG=1`, written to `~/.config/bosswatch/bosswatch.log`
/// - **Stderr output:** WARN+ only; the terminal line belongs to the prompt
/// - **Rotation:** Size-based at 10 MB, keeps only latest rotated file
///
/// # Fallback
/// If log directory creation fails, returns `None` and falls back to
/// stderr-only logging.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("BOSSWATCH_DEBUG").is_ok();

    // Get config directory: ~/.config/bosswatch on Linux, %APPDATA%/bosswatch on Windows
    let log_dir = match dirs::config_dir() {
        Some(config) => config.join("bosswatch"),
        None => {
            init_stderr_only(debug_logging);
            return None;
        }
    };

    // Create log directory if needed
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Can't use tracing yet since subscriber not initialized
        eprintln!(
            "Failed to create log directory {:?}: {}, using stderr only",
            log_dir, e
        );
        init_stderr_only(debug_logging);
        return None;
    }

    // Create size-based rolling file appender (10 MB, keep 1 rotated file)
    let log_path = log_dir.join("bosswatch.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(10 * 1024 * 1024),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stderr_only(debug_logging);
            return None;
        }
    };

    // Wrap in non-blocking writer for async-safe logging
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File layer: full detail, no ANSI colors
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(EnvFilter::new(filter_directive(debug_logging)));

    // Stderr layer: warnings only, so routine logging never tramples the REPL
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!(
        log_file = ?log_path,
        debug_logging,
        "bosswatch logging initialized"
    );

    Some(guard)
}

/// Filter directives based on BOSSWATCH_DEBUG
fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        // BOSSWATCH_DEBUG=1: debug for bosswatch crates, info for dependencies
        "info,bosswatch_core=debug,bosswatch_cli=debug"
    } else {
        "info"
    }
}

/// Fallback: Initialize stderr-only logging when file logging fails.
fn init_stderr_only(debug_logging: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_filter(EnvFilter::new(filter_directive(debug_logging)));

    tracing_subscriber::registry().with(stderr_layer).init();

    tracing::info!(debug_logging, "bosswatch logging initialized (stderr only)");
}
