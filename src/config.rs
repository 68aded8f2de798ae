use anyhow::{bail, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the configured backend base URL
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the sheet backend, e.g. `http://10.10.1.211:8080`
    pub backend_url: String,
    /// Display name shown in the dashboard header
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// Worksheet id loaded when none is given on the command line
    #[serde(default)]
    pub default_worksheet_id: String,
}

fn default_user_name() -> String {
    "User".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            user_name: default_user_name(),
            default_worksheet_id: String::new(),
        }
    }
}

impl Config {
    fn config_path() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".worklog-tui").join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Build the effective config: file settings, then environment
    /// overrides, then the startup validation that the backend base URL is
    /// present. A missing backend URL is a configuration error, reported
    /// before the terminal UI starts.
    pub fn resolve() -> Result<Config> {
        let mut config = Self::load().unwrap_or_default();

        if let Ok(url) = env::var(BACKEND_URL_VAR) {
            config.backend_url = url;
        }

        if config.backend_url.trim().is_empty() {
            bail!(
                "backend URL is not configured; set {} or backend_url in {}",
                BACKEND_URL_VAR,
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "~/.worklog-tui/config.json".to_string())
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"backend_url": "http://b:8080"}"#).expect("parses");
        assert_eq!(config.backend_url, "http://b:8080");
        assert_eq!(config.user_name, "User");
        assert_eq!(config.default_worksheet_id, "");
    }
}
