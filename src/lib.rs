// subtask-patch - rewrites unsafe `subtasks` access in a generated Flutter widget
// into null-safe Dart

pub mod config;
pub mod error;
pub mod patcher;
pub mod rules;

pub use config::{ConfigLoader, PatchConfig, WriteMode};
pub use error::{PatchError, PatchResult};
pub use patcher::{PatchReport, Patcher, CONFIRMATION};

use anyhow::Result;
use tracing::debug;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Default filter directive for a verbosity count from the CLI
pub fn filter_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "subtask_patch=warn",
        1 => "subtask_patch=info",
        _ => "subtask_patch=debug",
    }
}

/// Initialize the tracing subscriber
///
/// Logs always go to stderr so stdout carries only the confirmation line.
/// `RUST_LOG` takes precedence over the verbosity flag when set.
pub fn init_with_logger(verbose: u8) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_verbosity(verbose)));

    fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    debug!("Initializing subtask-patch v{}", version());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filters() {
        assert_eq!(filter_for_verbosity(0), "subtask_patch=warn");
        assert_eq!(filter_for_verbosity(1), "subtask_patch=info");
        assert_eq!(filter_for_verbosity(5), "subtask_patch=debug");
    }
}
