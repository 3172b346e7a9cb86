/// Application configuration management
/// Stores user preferences in ~/.config/servmon/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::constants::{DEFAULT_BACKEND_URL, ENV_BACKEND_URL, ENV_HOST};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: Option<String>,
    pub host: Option<String>,
}

impl AppConfig {
    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine the user config directory")?
            .join("servmon");

        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Self = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }
}

/// Resolved runtime settings. Precedence per value: CLI flag, then
/// environment (dotenv already loaded), then config file, then default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_url: String,
    pub host: String,
}

impl Settings {
    pub fn resolve(flag_backend_url: Option<&str>, flag_host: Option<&str>) -> Result<Self> {
        let file = AppConfig::load().unwrap_or_default();

        let backend_url = flag_backend_url
            .map(str::to_string)
            .or_else(|| std::env::var(ENV_BACKEND_URL).ok())
            .or(file.backend_url)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let host = flag_host
            .map(str::to_string)
            .or_else(|| std::env::var(ENV_HOST).ok())
            .or(file.host)
            .or_else(|| host_from_url(&backend_url))
            .unwrap_or_else(|| "localhost".to_string());

        Ok(Self { backend_url, host })
    }
}

/// Host component of a URL, used as the default probe target.
pub fn host_from_url(url: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig {
            backend_url: Some("http://10.0.0.5:3001".to_string()),
            host: Some("10.0.0.5".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.backend_url.as_deref(), Some("http://10.0.0.5:3001"));
        assert_eq!(loaded.host.as_deref(), Some("10.0.0.5"));
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.backend_url.is_none());
        assert!(loaded.host.is_none());
    }

    #[test]
    fn test_host_from_url() {
        assert_eq!(host_from_url("http://10.1.2.3:3001"), Some("10.1.2.3".to_string()));
        assert_eq!(host_from_url("https://monitor.example.com/api"), Some("monitor.example.com".to_string()));
        assert_eq!(host_from_url("not a url"), None);
    }
}
