// Configuration for subtask-patch
// Built-in defaults, optionally overlaid by a TOML file and then by CLI flags

#[allow(clippy::module_inception)]
pub mod config;
pub mod config_loader;

// Re-export main types for easier access
pub use config::{PatchConfig, WriteMode, DEFAULT_TARGET};
pub use config_loader::{ConfigFile, ConfigLoader};
