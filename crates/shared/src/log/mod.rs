// Logging module
// Console and optional rolling-file output through the tracing ecosystem
//
// Console output is always installed. When a log directory is given, a
// second non-ANSI layer writes to a daily rolling file in that directory.
// RUST_LOG, when set, takes precedence over the requested level.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default file name used for the rolling log when none is configured
pub const DEFAULT_LOG_FILE: &str = "tilegrid.log";

/// Map a numeric console level (0=Minimum, 1=Error, 2=Detail, 3=Full/Debug,
/// 4=Trace) to an EnvFilter directive.
pub fn map_log_level(level: i32) -> &'static str {
    match level {
        i32::MIN..=0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

/// Initialize the logging system.
///
/// The returned guard flushes the file writer when dropped; keep it alive for
/// the lifetime of the program. `None` is returned when no file layer was
/// installed or a global subscriber was already set.
pub fn initialize_logging(
    log_dir: Option<&str>,
    log_level: &str,
    file_name: Option<&str>,
) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let console = fmt::layer()
        .with_ansi(true)
        .with_target(false)
        .with_thread_ids(false);

    let Some(dir) = log_dir else {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .try_init();
        return None;
    };

    let path = Path::new(dir);
    if !path.exists() {
        let _ = std::fs::create_dir_all(path);
    }

    let file_appender = rolling::daily(dir, file_name.unwrap_or(DEFAULT_LOG_FILE));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .is_ok();

    installed.then_some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_log_level() {
        assert_eq!(map_log_level(-3), "error");
        assert_eq!(map_log_level(0), "error");
        assert_eq!(map_log_level(1), "warn");
        assert_eq!(map_log_level(2), "info");
        assert_eq!(map_log_level(3), "debug");
        assert_eq!(map_log_level(4), "trace");
        assert_eq!(map_log_level(42), "trace");
    }
}
