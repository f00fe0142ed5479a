use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use schedule_core::{CorruptDataPolicy, ScheduleConfig};

/// Show the config and data file locations, saving any supplied settings first.
pub fn run(data_file: Option<PathBuf>, on_corrupt: Option<CorruptDataPolicy>) -> Result<()> {
    let config_path = ScheduleConfig::config_path()?;
    // Creates the commented default file on first run
    ScheduleConfig::load().context("Failed to load configuration")?;

    let changed = data_file.is_some() || on_corrupt.is_some();
    let config = apply(&config_path, data_file, on_corrupt)?;

    if changed {
        println!(
            "{}",
            format!("Saved {}", config_path.display()).green()
        );
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data file:  {}", config.data_path().display());
    println!("{}", "Settings".bold());
    println!("  On corrupt: {}", policy_name(config.on_corrupt));

    Ok(())
}

/// Load the config at `config_path`, overwrite the supplied settings and save
/// it back. Nothing is written when no setting is supplied.
fn apply(
    config_path: &Path,
    data_file: Option<PathBuf>,
    on_corrupt: Option<CorruptDataPolicy>,
) -> Result<ScheduleConfig> {
    let mut config = ScheduleConfig::load_from(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    if data_file.is_none() && on_corrupt.is_none() {
        return Ok(config);
    }

    if let Some(data_file) = data_file {
        config.data_file = data_file;
    }
    if let Some(on_corrupt) = on_corrupt {
        config.on_corrupt = on_corrupt;
    }

    config
        .save(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config)
}

fn policy_name(policy: CorruptDataPolicy) -> &'static str {
    match policy {
        CorruptDataPolicy::Discard => "discard",
        CorruptDataPolicy::Backup => "backup",
    }
}
