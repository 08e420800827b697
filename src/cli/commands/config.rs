//! Config command handler

use std::io::{self, Write};

use crate::args::ConfigSubcommand;
use vertex_records::config::Config;
use vertex_records::{error, info};

/// Run a config subcommand; no subcommand prints the whole configuration.
///
/// # Returns
/// `false` when the key is unknown, the value is rejected or the file could
/// not be written.
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> bool {
    let outcome = match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            Ok(format!("\n=== Configuration ===\n\n{config}"))
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => lookup(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => apply_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => apply_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    };

    match outcome {
        Ok(message) => {
            println!("{message}");
            true
        }
        Err(message) => {
            error!("Config command failed: {message}");
            eprintln!("✗ {message}");
            false
        }
    }
}

fn lookup(config: &Config, key: &str) -> Result<String, String> {
    config
        .get(key)
        .ok_or_else(|| format!("Unknown config key: '{key}'"))
}

/// Set a key in memory and persist the file
fn apply_set(config: &mut Config, key: &str, value: &str) -> Result<String, String> {
    config.set(key, value)?;
    persist(config)?;
    info!("Config key '{key}' set to '{value}'");
    Ok(format!("✓ Set {key} = {value}"))
}

/// Restore a key's default and persist the file
fn apply_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<String, String> {
    config.unset(key, defaults)?;
    persist(config)?;
    info!("Config key '{key}' reset to default");
    Ok(format!("✓ Reset {key} to default"))
}

fn persist(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))
}

fn reset() -> Result<String, String> {
    if !Config::get_config_file_path().exists() {
        return Ok("✓ Config is already at defaults".to_string());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();
    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if !confirmed(&response) {
        return Ok("Reset cancelled".to_string());
    }
    Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
    Ok("✓ Config reset to defaults".to_string())
}

/// Whether a prompt answer means yes
fn confirmed(response: &str) -> bool {
    let answer = response.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
