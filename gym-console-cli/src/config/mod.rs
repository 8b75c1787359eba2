use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Separate base for `users/login/` and `users/register/`, when the auth
    /// service is deployed apart from the resource API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_base_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Maximum rows printed per table
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_time_format() -> String {
    "24h".to_string()
}

fn default_page_size() -> usize {
    50
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_base_url: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            time_format: default_time_format(),
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    /// Absolute URL for a resource path such as `training/machines/`
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Absolute URL for an auth path, honoring `auth_base_url`
    pub fn auth_endpoint(&self, path: &str) -> String {
        let base = self.auth_base_url.as_deref().unwrap_or(&self.base_url);
        join_url(base, path)
    }
}

fn is_valid_strftime(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl UiConfig {
    /// Replace a `date_format` chrono cannot render with the default
    pub fn sanitize(&mut self) {
        if !is_valid_strftime(&self.date_format) {
            tracing::warn!(
                "Invalid date_format '{}' in config, using '{}'",
                self.date_format,
                default_date_format()
            );
            self.date_format = default_date_format();
        }
    }

    /// strftime pattern for session times
    pub fn time_pattern(&self) -> &'static str {
        if self.time_format == "12h" {
            "%I:%M %p"
        } else {
            "%H:%M"
        }
    }
}

impl Config {
    /// Get config directory path (~/.gym-console/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".gym-console"))
    }

    /// Get config file path (~/.gym-console/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory holding the session database
    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("GYM_CONSOLE_DATA_DIR") {
            return Ok(PathBuf::from(path));
        }

        Ok(Self::config_dir()?.join("session.db"))
    }

    /// Resolve an explicit `--config` path or fall back to the default location
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_file = Self::resolve_path(path)?;

        if !config_file.exists() {
            tracing::debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;
        config.ui.sanitize();

        tracing::debug!("Loaded configuration from {}", config_file.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_file = Self::resolve_path(path)?;

        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(config_file)
    }
}
