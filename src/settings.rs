use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const MIN_REQUEST_TIMEOUT_MS: u64 = 250;
const MAX_REQUEST_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("checkboard");
        path.push("settings.toml");
        Some(path)
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        Self::load_from_path(&path)
    }

    fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(mut settings) => {
                    settings.validate();
                    settings
                }
                Err(error) => {
                    warn!(
                        "failed to parse settings config '{}': {}",
                        path.display(),
                        error
                    );
                    Self::default()
                }
            },
            Err(error) => {
                warn!(
                    "failed to read settings config '{}': {}",
                    path.display(),
                    error
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path().ok_or_else(|| anyhow!("unable to determine config path"))?;
        self.save_to_path(&path)
    }

    fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow!("invalid settings config path"))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory '{}'", parent.display()))?;

        let mut validated = self.clone();
        validated.validate();
        let contents =
            toml::to_string_pretty(&validated).context("failed to serialize settings to TOML")?;

        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow!("invalid settings config file name"))?
            .to_string_lossy()
            .to_string();
        let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));
        fs::write(&tmp_path, contents)
            .with_context(|| format!("failed to write settings to '{}'", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to move settings into '{}'", path.display()))?;

        Ok(())
    }

    pub fn validate(&mut self) {
        let trimmed = self.server_url.trim().trim_end_matches('/');
        self.server_url = if trimmed.is_empty() {
            DEFAULT_SERVER_URL.to_string()
        } else {
            trimmed.to_string()
        };

        self.request_timeout_ms = self
            .request_timeout_ms
            .clamp(MIN_REQUEST_TIMEOUT_MS, MAX_REQUEST_TIMEOUT_MS);
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_server() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
        assert_eq!(settings.request_timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn validate_clamps_timeout_and_normalizes_url() {
        let mut settings = Settings {
            server_url: "http://checks.internal/ ".to_string(),
            request_timeout_ms: 5,
        };
        settings.validate();
        assert_eq!(settings.server_url, "http://checks.internal");
        assert_eq!(settings.request_timeout_ms, MIN_REQUEST_TIMEOUT_MS);

        settings.request_timeout_ms = 999_999;
        settings.validate();
        assert_eq!(settings.request_timeout_ms, MAX_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn validate_restores_empty_url_to_default() {
        let mut settings = Settings {
            server_url: "   ".to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        };
        settings.validate();
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("settings.toml");

        let settings = Settings {
            server_url: "http://nkp8590:5000".to_string(),
            request_timeout_ms: 2_500,
        };
        settings.save_to_path(&path).expect("save settings");

        let loaded = Settings::load_from_path(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("settings.toml");
        fs::write(&path, "server_url = [42]").expect("write file");

        assert_eq!(Settings::load_from_path(&path), Settings::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("absent.toml");

        assert_eq!(Settings::load_from_path(&path), Settings::default());
    }
}
