use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::config::{PatchConfig, WriteMode};
use crate::error::{PatchError, PatchResult};

/// Contents of a TOML config file. Every key is optional and overrides the
/// built-in default when present.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub target: Option<PathBuf>,
    pub write_mode: Option<WriteMode>,
    pub backup: Option<bool>,
    pub require_match: Option<bool>,
    pub dry_run: Option<bool>,
}

impl ConfigFile {
    pub fn parse(content: &str, path: &Path) -> PatchResult<Self> {
        toml::from_str(content).map_err(|source| PatchError::ConfigParse {
            source,
            path: path.to_path_buf(),
        })
    }

    /// Overlay the keys present in the file onto `config`
    pub fn apply_to(self, config: &mut PatchConfig) {
        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(write_mode) = self.write_mode {
            config.write_mode = write_mode;
        }
        if let Some(backup) = self.backup {
            config.backup = backup;
        }
        if let Some(require_match) = self.require_match {
            config.require_match = require_match;
        }
        if let Some(dry_run) = self.dry_run {
            config.dry_run = dry_run;
        }
    }
}

/// The configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader that only yields the built-in defaults
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set a config file; it must exist when `load` is called
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load the configuration
    pub fn load(&self) -> PatchResult<PatchConfig> {
        let mut config = PatchConfig::default();

        let Some(path) = &self.config_path else {
            return Ok(config);
        };

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                PatchError::config_error(format!("config file not found: {}", path.display()))
            }
            _ => PatchError::io_error(e, path),
        })?;
        ConfigFile::parse(&content, path)?.apply_to(&mut config);
        debug!("Loaded config from {}: {:?}", path.display(), config);

        Ok(config)
    }
}
