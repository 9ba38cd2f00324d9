use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The generated widget file the patch was written for
pub const DEFAULT_TARGET: &str = r"c:\Users\resaa\Downloads\IndustryView\IndustryView\industryview-frontend\lib\flows\projeto\sprint\modal_add_tarefas_sprint02\modal_add_tarefas_sprint02_widget.dart";

/// How the patched buffer is written back
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Truncate and rewrite the target directly
    #[default]
    InPlace,
    /// Write a sibling temp file and rename it over the target
    Atomic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatchConfig {
    /// File to patch
    pub target: PathBuf,

    #[serde(default)]
    pub write_mode: WriteMode,

    /// Copy the original content to `<target>.bak` before writing
    #[serde(default)]
    pub backup: bool,

    /// Fail instead of reporting success when no rule matched
    #[serde(default)]
    pub require_match: bool,

    /// Print a diff instead of writing
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from(DEFAULT_TARGET),
            write_mode: WriteMode::InPlace,
            backup: false,
            require_match: false,
            dry_run: false,
        }
    }
}

impl PatchConfig {
    pub fn for_target(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Path used for the backup copy
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.target.as_os_str().to_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }
}
