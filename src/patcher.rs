use similar::TextDiff;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::{PatchConfig, WriteMode};
use crate::error::{PatchError, PatchResult};
use crate::rules::{RuleOutcome, RuleSet};

/// Printed to stdout after a successful save
pub const CONFIRMATION: &str = "Replacement complete.";

/// Result of a single run
#[derive(Debug, Clone)]
pub struct PatchReport {
    pub target: PathBuf,
    /// One entry per rule, in the order the rules ran
    pub outcomes: Vec<RuleOutcome>,
    pub changed: bool,
    /// False for dry runs
    pub written: bool,
    /// Unified diff of the change, only filled in for dry runs
    pub diff: Option<String>,
}

impl PatchReport {
    pub fn total_replacements(&self) -> usize {
        self.outcomes.iter().map(|o| o.replacements).sum()
    }
}

/// Load, transform, save for one target file
pub struct Patcher {
    config: PatchConfig,
    rules: RuleSet,
}

impl Patcher {
    pub fn new(config: PatchConfig) -> PatchResult<Self> {
        Ok(Self {
            config,
            rules: RuleSet::builtin()?,
        })
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Read the whole target as UTF-8
    pub fn load(&self) -> PatchResult<String> {
        let path = &self.config.target;
        let content = fs::read_to_string(path).map_err(|e| PatchError::io_error(e, path))?;
        debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }

    pub fn transform(&self, content: &str) -> (String, Vec<RuleOutcome>) {
        self.rules.apply(content)
    }

    /// Write the patched buffer back to the target
    pub fn save(&self, original: &str, patched: &str) -> PatchResult<()> {
        let path = &self.config.target;

        if self.config.backup {
            let backup = self.config.backup_path();
            fs::write(&backup, original).map_err(|e| PatchError::io_error(e, &backup))?;
            info!("Backed up original to {}", backup.display());
        }

        match self.config.write_mode {
            WriteMode::InPlace => {
                fs::write(path, patched).map_err(|e| PatchError::io_error(e, path))?
            }
            WriteMode::Atomic => write_atomic(path, patched)?,
        }

        debug!("Wrote {} bytes to {}", patched.len(), path.display());
        Ok(())
    }

    /// Run the whole patch once
    pub fn run(&self) -> PatchResult<PatchReport> {
        let target = &self.config.target;
        info!("Patching {}", target.display());

        let original = self.load()?;
        let (patched, outcomes) = self.transform(&original);

        for outcome in &outcomes {
            info!("{}: {} replacement(s)", outcome.rule, outcome.replacements);
        }

        let mut report = PatchReport {
            target: target.clone(),
            outcomes,
            changed: patched != original,
            written: false,
            diff: None,
        };

        if report.total_replacements() == 0 {
            if self.config.require_match {
                return Err(PatchError::no_matches(target));
            }
            warn!("No rule matched in {}", target.display());
        }

        if self.config.dry_run {
            report.diff = Some(unified_diff(target, &original, &patched));
            return Ok(report);
        }

        self.save(&original, &patched)?;
        report.written = true;
        Ok(report)
    }
}

/// Write to a sibling temp file, then rename it over `path`
fn write_atomic(path: &Path, content: &str) -> PatchResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| PatchError::io_error(e, dir))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| PatchError::io_error(e, temp.path()))?;

    // Temp files are created 0600; keep the target's mode across the rename
    match fs::metadata(path) {
        Ok(meta) => temp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| PatchError::io_error(e, temp.path()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(PatchError::io_error(e, path)),
    }

    temp.persist(path)
        .map_err(|e| PatchError::io_error(e.error, path))?;
    Ok(())
}

/// Unified diff between the original and patched buffers
pub fn unified_diff(path: &Path, original: &str, patched: &str) -> String {
    let name = path.display().to_string();
    TextDiff::from_lines(original, patched)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", name), &format!("b/{}", name))
        .to_string()
}
