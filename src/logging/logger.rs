// file: src/logging/logger.rs
// version: 2.0.0
// guid: j0k1l2m3-n4o5-6789-0123-456789jklmno

//! Logger initialization and configuration

use crate::error::{ChownError, Result};
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// `RUST_LOG` wins over `level` when set. Output goes to stderr so stdout
/// only carries the per-path report.
pub fn init_logger(level: &str) -> Result<()> {
    let filter = build_filter(level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| ChownError::logging(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(level)
        .map_err(|e| ChownError::logging(format!("Invalid log level '{}': {}", level, e)))
}

/// Run `f` inside an `operation` span
pub async fn with_async_operation_span<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let span = tracing::info_span!("operation", name = operation);
    f().instrument(span).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice() {
        // Only one global subscriber per process; the second call must fail
        // cleanly rather than panic.
        let first = init_logger("info");
        let second = init_logger("debug");
        assert!(first.is_err() || second.is_err());
    }

    #[test]
    fn test_build_filter_levels() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(build_filter("warn").is_ok());
        assert!(build_filter("dfs_chown=debug,reqwest=info").is_ok());
        assert!(build_filter("dfs_chown=loud").is_err());
    }

    #[tokio::test]
    async fn test_with_async_operation_span() {
        let result = with_async_operation_span("chown /a", || async { 40 + 2 }).await;
        assert_eq!(result, 42);
    }
}
