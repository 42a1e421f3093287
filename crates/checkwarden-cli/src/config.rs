//! Configuration loading and types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the checkwarden CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level or filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Monitoring API settings
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
        }
    }
}

/// Monitoring API connection and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub user: Option<String>,
    pub password: Option<String>,
    pub app_key: Option<String>,
    /// Account owner for multi-user accounts
    pub account_email: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user: None,
            password: None,
            app_key: None,
            account_email: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_base_url() -> String {
    checkwarden_client::PingdomClient::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    pub fn load_default() -> eyre::Result<Self> {
        if let Ok(path) = std::env::var("CHECKWARDEN_CONFIG") {
            return Self::load(Path::new(&path));
        }

        let mut paths = vec![
            PathBuf::from("checkwarden.toml"),
            PathBuf::from("/etc/checkwarden/checkwarden.toml"),
        ];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("checkwarden/checkwarden.toml"));
        }

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.api.base_url, "https://api.pingdom.com/api/2.0/");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.user.is_none());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            log_level = "checkwarden_core=debug"

            [api]
            base_url = "https://pingdom.internal/api/2.0/"
            timeout_secs = 10
            user = "ops@example.com"
            password = "password123"
            app_key = "apipassword123"
            account_email = "owner@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "checkwarden_core=debug");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.user.as_deref(), Some("ops@example.com"));
        assert_eq!(config.api.account_email.as_deref(), Some("owner@example.com"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(Config::load(Path::new("/nonexistent/checkwarden.toml")).is_err());
    }
}
