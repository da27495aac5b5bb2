//! Logging Infrastructure
//!
//! Console output (plain or JSON) plus an optional daily-rolling JSON file
//! under `log_dir`. `RUST_LOG` overrides `level` when set.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logger with console output only
pub fn init_logger(level: &str) -> bool {
    init_logger_with_file(level, false, None).unwrap_or(false)
}

/// Initialize the logging system
///
/// Returns `Ok(false)` when a global subscriber was already installed
/// (tests, embedding applications); the call is then a no-op.
///
/// # Examples
/// ```no_run
/// // development
/// order_engine::init_logger_with_file("debug", false, None)?;
/// // production
/// order_engine::init_logger_with_file("info", true, Some(std::path::Path::new("./logs")))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<bool> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console = fmt::layer().with_target(false);
    if json_format {
        layers.push(console.json().with_filter(env_filter(level)).boxed());
    } else {
        layers.push(console.with_filter(env_filter(level)).boxed());
    }

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "order-engine");
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(appender)
                .with_filter(env_filter(level))
                .boxed(),
        );
    }

    Ok(tracing_subscriber::registry().with(layers).try_init().is_ok())
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        // whichever call runs first in this process installs the subscriber
        let _ = init_logger_with_file("debug", true, Some(&logs)).unwrap();
        assert!(logs.exists());
        assert!(!init_logger_with_file("info", false, None).unwrap());
        tracing::info!("logger ready");
    }
}
