use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::{
    cli::{exit_status::ExitStatus, report::SUCCESS_MARK},
    config::{CONFIG_FILE_NAME, default_config_json},
};

/// Write the default configuration into `dir`. An existing file is never replaced.
pub fn init(dir: &Path) -> Result<ExitStatus> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
