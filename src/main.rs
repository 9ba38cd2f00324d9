use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use subtask_patch::{ConfigLoader, PatchConfig, Patcher, WriteMode, CONFIRMATION};

/// Rewrite unsafe `subtasks` access in the sprint task widget into null-safe Dart
#[derive(Debug, Parser)]
#[command(name = "subtask-patch", version, about)]
struct Cli {
    /// File to patch (defaults to the sprint02 task modal widget)
    target: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write through a temp file and rename it over the target
    #[arg(long)]
    atomic: bool,

    /// Keep a copy of the original as <target>.bak
    #[arg(long)]
    backup: bool,

    /// Fail when no rule matched
    #[arg(long)]
    require_match: bool,

    /// Print the diff instead of writing
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Result<PatchConfig> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::with_path(path),
            None => ConfigLoader::new(),
        };
        let mut config = loader.load().context("Failed to load configuration")?;

        if let Some(target) = self.target {
            config.target = target;
        }
        if self.atomic {
            config.write_mode = WriteMode::Atomic;
        }
        config.backup |= self.backup;
        config.require_match |= self.require_match;
        config.dry_run |= self.dry_run;

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    subtask_patch::init_with_logger(cli.verbose)?;

    let config = cli.into_config()?;
    let target = config.target.clone();

    let report = Patcher::new(config)?
        .run()
        .with_context(|| format!("Failed to patch {}", target.display()))?;

    info!(
        "{} replacement(s) in {}",
        report.total_replacements(),
        report.target.display()
    );

    match report.diff {
        Some(diff) => print!("{}", diff),
        None => println!("{}", CONFIRMATION),
    }

    Ok(())
}
