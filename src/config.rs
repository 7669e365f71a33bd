use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub temperature: TemperatureConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// plain | bars | control
    pub profile: String,
    /// auto | tui | text
    pub renderer: String,
    /// auto | color | mono
    pub color: String,
    pub mount_point: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            profile: "control".to_string(),
            renderer: "auto".to_string(),
            color: "auto".to_string(),
            mount_point: PathBuf::from("/"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    /// Overrides the platform's default helper program.
    pub helper_command: Option<String>,
    pub helper_timeout_ms: u64,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        TemperatureConfig {
            helper_command: None,
            helper_timeout_ms: 2000,
        }
    }
}

impl TemperatureConfig {
    pub fn helper_timeout(&self) -> Duration {
        Duration::from_millis(self.helper_timeout_ms)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// No file, no log output.
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            level: "info".to_string(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysgauge").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
