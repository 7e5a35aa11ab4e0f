use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::dashboard::Columns;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base URL of the form script endpoint.
    pub script_url: Option<String>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Response column holding the group key.
    #[serde(default = "default_group_column")]
    pub group_column: String,
    /// Response column holding the submission timestamp.
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    /// ID of the question whose answer selects the group. When unset, the
    /// first Dropdown question is used.
    #[serde(default)]
    pub group_selector_question: Option<String>,
}

fn default_page_size() -> usize {
    25
}

fn default_group_column() -> String {
    "P1".to_string()
}

fn default_timestamp_column() -> String {
    "Timestamp".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            group_column: default_group_column(),
            timestamp_column: default_timestamp_column(),
            group_selector_question: None,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("forms-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".forms-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {config_dir:?}"))?;
            info!("Created config directory: {config_dir:?}");
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {config_path:?}");

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {config_path:?}"))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {config_path:?}"))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        debug!("Saving config to: {config_path:?}");

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {config_path:?}"))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn set_script_url(&mut self, url: String) -> Result<()> {
        info!("Setting script URL to: {url}");
        self.script_url = Some(url);
        self.save()
    }

    /// The script URL, honoring a command-line override.
    pub fn resolve_url(&self, override_url: Option<String>) -> Result<String> {
        override_url
            .or_else(|| self.script_url.clone())
            .context("No script URL configured. Run 'forms-cli config set-url <URL>' first.")
    }

    pub fn columns(&self) -> Columns {
        Columns {
            group: self.settings.group_column.clone(),
            timestamp: self.settings.timestamp_column.clone(),
        }
    }
}
