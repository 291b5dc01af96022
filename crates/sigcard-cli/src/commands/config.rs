//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use sigcard_core::SigcardConfig;

use super::config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.tail_window")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path(path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

/// Load the file at `config_path`, or defaults when it does not exist yet.
fn read_or_default(config_path: &Path) -> anyhow::Result<SigcardConfig> {
    if config_path.exists() {
        Ok(SigcardConfig::from_file(config_path)?)
    } else {
        Ok(SigcardConfig::default())
    }
}

/// JSON pointer for a dotted key such as `graph.timeout_secs`.
fn key_pointer(key: &str) -> String {
    format!("/{}", key.replace('.', "/"))
}

fn show_config(config_path: &Path) -> anyhow::Result<()> {
    if !config_path.exists() {
        eprintln!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            config_path.display()
        );
    }

    let config = read_or_default(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(args: InitArgs, config_path: &Path) -> anyhow::Result<()> {
    let target = args.output.unwrap_or_else(|| config_path.to_path_buf());

    if target.exists() && !args.force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite it",
            target.display()
        );
    }
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir)?;
    }

    SigcardConfig::default().save(&target)?;
    println!("{} Wrote default configuration to {}", style("✓").green(), target.display());
    Ok(())
}

fn get_config(config_path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(read_or_default(config_path)?)?;
    let value = json
        .pointer(&key_pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Replace one leaf value and return the updated configuration.
fn with_value(config: &SigcardConfig, key: &str, raw: &str) -> anyhow::Result<SigcardConfig> {
    let mut json = serde_json::to_value(config)?;
    let slot = json
        .pointer_mut(&key_pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
    if slot.is_object() {
        anyhow::bail!("{} is a section, set one of its keys instead", key);
    }

    // Bare words that are not valid JSON are taken as strings
    *slot = serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));

    serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))
}

fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = with_value(&read_or_default(config_path)?, key, value)?;

    if let Some(dir) = config_path.parent() {
        fs::create_dir_all(dir)?;
    }
    config.save(config_path)?;

    println!("{} {} = {}", style("✓").green(), key, value);
    Ok(())
}

fn show_path(config_path: &Path) -> anyhow::Result<()> {
    let status = if config_path.exists() {
        style("exists").green()
    } else {
        style("missing, run `sigcard config init`").yellow()
    };
    println!("{} ({})", config_path.display(), status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pointer() {
        assert_eq!(key_pointer("extraction.tail_window"), "/extraction/tail_window");
        assert_eq!(key_pointer("graph"), "/graph");
    }

    #[test]
    fn test_with_value_updates_leaf() {
        let config = with_value(&SigcardConfig::default(), "extraction.tail_window", "3").unwrap();
        assert_eq!(config.extraction.tail_window, 3);

        let config = with_value(&config, "graph.base_url", "http://localhost:9000").unwrap();
        assert_eq!(config.graph.base_url, "http://localhost:9000");
        assert_eq!(config.extraction.tail_window, 3);
    }

    #[test]
    fn test_with_value_rejects_bad_keys_and_types() {
        let config = SigcardConfig::default();
        assert!(with_value(&config, "extraction.no_such_key", "1").is_err());
        assert!(with_value(&config, "graph", "1").is_err());
        assert!(with_value(&config, "extraction.tail_window", "six").is_err());
    }
}
