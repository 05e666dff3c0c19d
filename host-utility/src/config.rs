// Configuration management for the epd-push host utility
//
// Settings live in a JSON file under the XDG config directory. A missing file
// means defaults; nothing is written until the user changes a value.

use anyhow::{Context, Result};
use colored::Colorize;
use epd_frame::Canvas;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DEVICE_URL, DEFAULT_TIMEOUT_SECS};
use crate::utils;

const CONFIG_VERSION: u32 = 1;

/// epd-push configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpdPushConfig {
    /// Configuration schema version for future migrations
    pub version: u32,

    /// Base URL of the display (e.g., <http://192.168.1.139/>)
    pub device_url: String,

    /// Panel width in pixels
    pub width: u32,

    /// Panel height in pixels
    pub height: u32,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for EpdPushConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            device_url: DEFAULT_DEVICE_URL.to_string(),
            width: Canvas::DEFAULT.width,
            height: Canvas::DEFAULT.height,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EpdPushConfig {
    /// Load configuration from the XDG config file, or defaults if missing
    ///
    /// A file that cannot be read or parsed is reported and ignored.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Ok(Self::load_or_default(&config_path))
    }

    fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    utils::warning(&format!("Configuration validation failed: {e}"));
                    eprintln!("  Invalid values replaced with defaults.");
                    eprintln!("  Run 'epd-push config reset' to restore defaults.");
                    config.with_defaults_for_invalid()
                }
            },
            Err(e) => {
                utils::warning(&format!("Failed to load config file: {e:#}"));
                eprintln!("  Using defaults.");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file path
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the XDG config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get the XDG-compliant configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory (XDG_CONFIG_HOME or ~/.config)")?;

        Ok(config_dir.join("epd-push").join("config.json"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_url(&self.device_url)?;
        self.canvas()?;

        if self.timeout_secs == 0 {
            anyhow::bail!("Timeout must be at least one second");
        }

        Ok(())
    }

    /// Replace each invalid field with its default, keeping the valid ones
    fn with_defaults_for_invalid(mut self) -> Self {
        let defaults = Self::default();
        if validate_url(&self.device_url).is_err() {
            self.device_url = defaults.device_url;
        }
        if self.canvas().is_err() {
            self.width = defaults.width;
            self.height = defaults.height;
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = defaults.timeout_secs;
        }
        self
    }

    /// Canvas the encoder should target
    pub fn canvas(&self) -> Result<Canvas> {
        Canvas::new(self.width, self.height).context("Invalid panel dimensions")
    }

    /// Apply a `config set` key/value pair
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "device-url" => {
                validate_url(value)?;
                self.device_url = value.to_string();
            }
            "width" => self.width = parse_positive(key, value)?,
            "height" => self.height = parse_positive(key, value)?,
            "timeout-secs" => {
                self.timeout_secs = u64::from(parse_positive(key, value)?);
            }
            _ => {
                anyhow::bail!(
                    "Unknown configuration key: {key}\nValid keys: device-url, width, height, timeout-secs"
                );
            }
        }
        Ok(())
    }

    /// Reset configuration - delete the config file so defaults apply again
    pub fn reset(skip_confirm: bool) -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            if !utils::prompt_yes_no("Delete existing configuration?", skip_confirm)? {
                anyhow::bail!("Configuration reset cancelled");
            }

            std::fs::remove_file(&config_path).with_context(|| {
                format!("Failed to delete config file: {}", config_path.display())
            })?;
            utils::success("Deleted configuration file");
        }

        Ok(Self::default())
    }
}

fn validate_url(url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("Invalid device URL '{url}': must start with http:// or https://");
    }
    Ok(())
}

fn parse_positive(key: &str, value: &str) -> Result<u32> {
    let parsed: u32 = value
        .parse()
        .with_context(|| format!("Invalid value for {key}: {value}"))?;
    if parsed == 0 {
        anyhow::bail!("{key} must be greater than zero");
    }
    Ok(parsed)
}

/// CLI command handlers
pub fn run_config_command(command: crate::ConfigCommands) -> Result<()> {
    use crate::ConfigCommands;

    match command {
        ConfigCommands::Show => cmd_config_show(),
        ConfigCommands::Set { key, value } => cmd_config_set(&key, &value),
        ConfigCommands::Reset { yes } => cmd_config_reset(yes),
        ConfigCommands::Path => cmd_config_path(),
    }
}

/// Show current configuration
fn cmd_config_show() -> Result<()> {
    let config = EpdPushConfig::load()?;
    let config_path = EpdPushConfig::config_path()?;

    println!();
    println!("{}", "Current configuration:".bold());
    println!("  Device URL:   {}", config.device_url);
    println!("  Panel size:   {}x{}", config.width, config.height);
    println!("  Timeout:      {}s", config.timeout_secs);
    println!();
    if config_path.exists() {
        println!(
            "Config file: {}",
            config_path.display().to_string().dimmed()
        );
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().dimmed(),
            "(not created, defaults in use)".dimmed()
        );
    }
    println!();

    Ok(())
}

/// Set a configuration value
fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = EpdPushConfig::load()?;
    config.set(key, value)?;
    config.save()?;

    utils::success("Configuration updated");
    println!();

    Ok(())
}

/// Reset configuration
fn cmd_config_reset(yes: bool) -> Result<()> {
    EpdPushConfig::reset(yes)?;
    println!();
    utils::success("Configuration reset complete");
    println!();
    Ok(())
}

/// Show configuration file path
fn cmd_config_path() -> Result<()> {
    let config_path = EpdPushConfig::config_path()?;
    println!("{}", config_path.display());
    Ok(())
}
