//! Config command handlers

use std::path::Path;

use anyhow::{bail, Context, Result};

use notelab_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "sync_url": config.sync_url,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir: {}", config.data_dir.display());
            println!(
                "  sync_url: {}",
                config.sync_url.as_deref().unwrap_or("(not set)")
            );
            println!(
                "  log_file: {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one key/value pair; `none` or empty clears optional keys
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let cleared = value.is_empty() || value == "none";

    match key {
        "data_dir" => {
            if cleared {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "sync_url" => {
            config.sync_url = if cleared {
                None
            } else {
                Some(value.trim_end_matches('/').to_string())
            };
        }
        "log_file" => {
            config.log_file = if cleared { None } else { Some(value.into()) };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, sync_url, log_file",
                key
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_apply_sync_url() {
        let mut config = Config::default();

        apply(&mut config, "sync_url", "https://sync.example.com/").unwrap();
        assert_eq!(config.sync_url.as_deref(), Some("https://sync.example.com"));

        apply(&mut config, "sync_url", "none").unwrap();
        assert!(config.sync_url.is_none());
    }

    #[test]
    fn test_apply_log_file() {
        let mut config = Config::default();

        apply(&mut config, "log_file", "/tmp/notelab.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/notelab.log")));

        apply(&mut config, "log_file", "").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_unknown_key() {
        let mut config = Config::default();
        let err = apply(&mut config, "theme", "dark").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_apply_rejects_empty_data_dir() {
        let mut config = Config::default();
        assert!(apply(&mut config, "data_dir", "").is_err());
    }
}
