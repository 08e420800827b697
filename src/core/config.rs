//! Configuration module for `VertexRecords`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::progress::DEFAULT_REQUIRED_CREDITS;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory inside path values
const DIR_VARIABLE: &str = "$VERTEX_RECORDS";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Academic defaults applied when source data is incomplete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicsConfig {
    /// Program credit requirement used when the student profile omits one
    #[serde(default)]
    pub default_required_credits: u32,
    /// Display label for records whose semester could not be resolved
    #[serde(default)]
    pub unresolved_label: String,
}

impl Default for AcademicsConfig {
    fn default() -> Self {
        Self {
            default_required_credits: DEFAULT_REQUIRED_CREDITS,
            unresolved_label: String::new(),
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory searched for snapshot files given by bare name
    #[serde(default)]
    pub snapshots_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Academic defaults
    #[serde(default)]
    pub academics: AcademicsConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the default program credit requirement
    pub default_required_credits: Option<u32>,
    /// Override snapshot lookup directory
    pub snapshots_dir: Option<String>,
}

impl Config {
    /// Get the `$VERTEX_RECORDS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/vertexrecords`
    /// - macOS: `~/Library/Application Support/vertexrecords`
    /// - Windows: `%APPDATA%\vertexrecords`
    #[must_use]
    pub fn get_records_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vertexrecords")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fields that are empty (or zero, for the credit requirement) in the
    /// current config and set in `defaults` are copied over, so configs written
    /// by older versions pick up newly added keys.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.academics.default_required_credits == 0
            && defaults.academics.default_required_credits != 0
        {
            self.academics.default_required_credits = defaults.academics.default_required_credits;
            changed = true;
        }
        if self.academics.unresolved_label.is_empty()
            && !defaults.academics.unresolved_label.is_empty()
        {
            self.academics
                .unresolved_label
                .clone_from(&defaults.academics.unresolved_label);
            changed = true;
        }

        if self.paths.snapshots_dir.is_empty() && !defaults.paths.snapshots_dir.is_empty() {
            self.paths
                .snapshots_dir
                .clone_from(&defaults.paths.snapshots_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file itself is
    /// left untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(credits) = overrides.default_required_credits {
            self.academics.default_required_credits = credits;
        }
        if let Some(dir) = &overrides.snapshots_dir {
            self.paths.snapshots_dir.clone_from(dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_records_dir`](Self::get_records_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_records_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$VERTEX_RECORDS` in a config value to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let records_dir = Self::get_records_dir();
            value.replace(DIR_VARIABLE, records_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults; `$VERTEX_RECORDS` is expanded
    /// in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.snapshots_dir = Self::expand_variables(&config.paths.snapshots_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults on first run
    ///
    /// An existing file is merged with the defaults (and re-saved when that
    /// added keys). Any read or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform-specific config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Resolve a snapshot argument: used as given when it exists, otherwise
    /// looked up inside `paths.snapshots_dir`.
    #[must_use]
    pub fn resolve_snapshot_path(&self, arg: &std::path::Path) -> PathBuf {
        if arg.exists() || self.paths.snapshots_dir.is_empty() {
            return arg.to_path_buf();
        }
        let candidate = PathBuf::from(&self.paths.snapshots_dir).join(arg);
        if candidate.exists() {
            candidate
        } else {
            arg.to_path_buf()
        }
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `default_required_credits`
    /// (alias `required-credits`), `unresolved_label`, `snapshots_dir`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "default_required_credits" | "required-credits" => {
                Some(self.academics.default_required_credits.to_string())
            }
            "unresolved_label" | "unresolved-label" => {
                Some(self.academics.unresolved_label.clone())
            }
            "snapshots_dir" | "snapshots-dir" => Some(self.paths.snapshots_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    /// (e.g. `"maybe"` for `verbose`, `"-5"` for the credit requirement).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value.parse::<crate::logger::Level>()?;
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "default_required_credits" | "required-credits" => {
                self.academics.default_required_credits = value.parse::<u32>().map_err(|_| {
                    format!("Invalid credit count for 'default_required_credits': '{value}'")
                })?;
            }
            "unresolved_label" | "unresolved-label" => {
                self.academics.unresolved_label = value.to_string();
            }
            "snapshots_dir" | "snapshots-dir" => self.paths.snapshots_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to the value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "default_required_credits" | "required-credits" => {
                self.academics.default_required_credits =
                    defaults.academics.default_required_credits;
            }
            "unresolved_label" | "unresolved-label" => self
                .academics
                .unresolved_label
                .clone_from(&defaults.academics.unresolved_label),
            "snapshots_dir" | "snapshots-dir" => self
                .paths
                .snapshots_dir
                .clone_from(&defaults.paths.snapshots_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// Succeeds without doing anything when no file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[academics]")?;
        writeln!(
            f,
            "  default_required_credits = {}",
            self.academics.default_required_credits
        )?;
        writeln!(
            f,
            "  unresolved_label = \"{}\"",
            self.academics.unresolved_label
        )?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  snapshots_dir = \"{}\"", self.paths.snapshots_dir)?;

        Ok(())
    }
}
