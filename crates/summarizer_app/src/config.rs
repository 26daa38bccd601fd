//! Application configuration stored as RON next to the working directory.
//!
//! Precedence: command line > `SUMMARIZER_BASE_URL` > config file > defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use summarizer_core::DEFAULT_PROGRESS_RESET_DELAY;
use summarizer_engine::{write_atomic, UploadSettings, DEFAULT_BASE_URL, DEFAULT_UPLOAD_PATH};

use crate::cli::Cli;
use crate::platform::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub upload_path: String,
    pub progress_reset_ms: u64,
    pub clipboard_linger_ms: u64,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            progress_reset_ms: DEFAULT_PROGRESS_RESET_DELAY.as_millis() as u64,
            clipboard_linger_ms: 2000,
            log_destination: LogDestination::Terminal,
            log_file: PathBuf::from("summarizer.log"),
        }
    }
}

impl AppConfig {
    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            base_url: self.base_url.clone(),
            upload_path: self.upload_path.clone(),
        }
    }

    pub fn progress_reset_delay(&self) -> Duration {
        Duration::from_millis(self.progress_reset_ms)
    }

    pub fn clipboard_linger(&self) -> Duration {
        Duration::from_millis(self.clipboard_linger_ms)
    }

    /// Command-line values win over whatever the file said.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(upload_path) = &cli.upload_path {
            self.upload_path = upload_path.clone();
        }
        if let Some(destination) = cli.log {
            self.log_destination = destination;
        }
    }
}

/// Result of reading the config file. Problems are reported, not fatal.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub warning: Option<String>,
}

pub fn load_config(path: &Path) -> LoadedConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return LoadedConfig {
                config: AppConfig::default(),
                warning: None,
            };
        }
        Err(err) => {
            return LoadedConfig {
                config: AppConfig::default(),
                warning: Some(format!("Failed to read config from {:?}: {}", path, err)),
            };
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => LoadedConfig {
            config,
            warning: None,
        },
        Err(err) => LoadedConfig {
            config: AppConfig::default(),
            warning: Some(format!("Failed to parse config from {:?}: {}", path, err)),
        },
    }
}

pub fn save_config(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    let pretty = ron::ser::PrettyConfig::new();
    let content =
        ron::ser::to_string_pretty(config, pretty).context("failed to serialize config")?;
    write_atomic(path, content.as_bytes())
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults_silently() {
        let temp = TempDir::new().unwrap();
        let loaded = load_config(&temp.path().join("absent.ron"));
        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.warning.is_none());
        assert_eq!(loaded.config.base_url, "http://127.0.0.1:8000");
        assert_eq!(loaded.config.progress_reset_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn malformed_file_gives_defaults_with_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.ron");
        fs::write(&path, "(base_url: 42").unwrap();

        let loaded = load_config(&path);
        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.warning.unwrap().contains("Failed to parse config"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("partial.ron");
        fs::write(&path, r#"(base_url: "http://summaries.internal:8080")"#).unwrap();

        let loaded = load_config(&path);
        assert!(loaded.warning.is_none());
        assert_eq!(loaded.config.base_url, "http://summaries.internal:8080");
        assert_eq!(loaded.config.upload_path, "/upload");
    }

    #[test]
    fn saved_config_loads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("summarizer.ron");
        let config = AppConfig {
            base_url: "http://localhost:9000".to_string(),
            log_destination: LogDestination::Both,
            clipboard_linger_ms: 0,
            ..AppConfig::default()
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).config, config);
    }

    #[test]
    fn command_line_overrides_file_values() {
        let mut config = AppConfig {
            base_url: "http://from-file:1".to_string(),
            ..AppConfig::default()
        };
        let cli = Cli::try_parse_from([
            "summarizer",
            "--base-url",
            "http://from-cli:2",
            "--upload-path",
            "/v2/upload",
            "--log",
            "file",
        ])
        .unwrap();

        config.apply_overrides(&cli);
        assert_eq!(config.base_url, "http://from-cli:2");
        assert_eq!(config.upload_path, "/v2/upload");
        assert_eq!(config.log_destination, LogDestination::File);
        assert_eq!(
            config.upload_settings().endpoint().unwrap().as_str(),
            "http://from-cli:2/v2/upload"
        );
    }
}
