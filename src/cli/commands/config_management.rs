//! Configuration commands

use colored::Colorize;
use std::path::Path;

use crate::cli::CliError;
use crate::config::StaticConfig;

const DEFAULT_SAMPLE_PATH: &str = "config.example.toml";

pub fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| DEFAULT_SAMPLE_PATH.to_string());

    if Path::new(&path).exists() && !force {
        return Err(CliError::CommandError(format!(
            "{} already exists, use --force to overwrite",
            path
        )));
    }

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| CliError::CommandError(format!("Failed to write {}: {}", path, e)))?;

    println!(
        "{} Sample configuration written to {}",
        "✓".bold().green(),
        path.cyan()
    );
    Ok(())
}
