//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use linkvault_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "storage_key": config.storage_key,
                    "categories": config.categories,
                    "default_category": config.default_category,
                    "links_path": config.links_path(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.links_path().display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:         {}", config.data_dir.display());
            println!("  storage_key:      {}", config.storage_key);
            println!("  categories:       {}", config.categories.join(", "));
            println!("  default_category: {}", config.default_category);
            println!();
            println!("Links file:  {}", config.links_path().display());
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match key.as_str() {
        "data_dir" => {
            config.data_dir = value.clone().into();
        }
        "storage_key" => {
            if value.trim().is_empty() {
                bail!("storage_key cannot be empty");
            }
            config.storage_key = value.trim().to_string();
        }
        "categories" => {
            config.categories = parse_list(&value);
        }
        "default_category" => {
            config.default_category = value.trim().to_string();
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, storage_key, categories, default_category",
                key
            );
        }
    }

    // Refuse to write a config that cannot be loaded back
    config.validate()?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Split a comma-separated list, dropping blank entries
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
