use std::{fs, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::paths::ProjectPaths;

#[derive(Debug)]
pub enum ConfigLoadError {
    NotFound,
    ParseError(String),
    IoError(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::NotFound => write!(f, "Config file not found"),
            ConfigLoadError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigLoadError::IoError(msg) => write!(f, "IO error reading config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

fn default_autoplay() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    5
}

fn default_ambient_hearts() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HanamiConfig {
    /// Start with auto-play running.
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,

    /// Seconds between auto-advanced dialogue lines.
    #[serde(default = "default_interval_secs")]
    pub dialogue_interval_secs: u64,

    /// Low-rate random heart bursts between story beats.
    #[serde(default = "default_ambient_hearts")]
    pub ambient_hearts: bool,

    /// Write logs to a file in the data directory.
    #[serde(default)]
    pub file_logging: bool,
}

impl Default for HanamiConfig {
    fn default() -> Self {
        Self {
            autoplay: default_autoplay(),
            dialogue_interval_secs: default_interval_secs(),
            ambient_hearts: default_ambient_hearts(),
            file_logging: false,
        }
    }
}

impl HanamiConfig {
    pub fn config_path() -> PathBuf {
        let proj_paths = ProjectPaths::new("hanami").expect("Failed to determine config directory");
        proj_paths.config_dir().join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigLoadError> {
        let path = Self::config_path();

        if !path.exists() {
            return Err(ConfigLoadError::NotFound);
        }

        let content =
            fs::read_to_string(&path).map_err(|e| ConfigLoadError::IoError(e.to_string()))?;
        let config =
            toml::from_str(&content).map_err(|e| ConfigLoadError::ParseError(e.to_string()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Everything here has a sensible default, so a missing file is not an
    /// error the way it is for an app with servers and accounts.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(ConfigLoadError::NotFound) => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable config: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&self)?;
        fs::write(&path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn dialogue_interval(&self) -> Duration {
        Duration::from_secs(self.dialogue_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: HanamiConfig = toml::from_str("").unwrap();
        assert!(config.autoplay);
        assert_eq!(config.dialogue_interval_secs, 5);
        assert!(config.ambient_hearts);
        assert!(!config.file_logging);
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let config: HanamiConfig = toml::from_str(
            r#"
            autoplay = false
            dialogue_interval_secs = 8
            "#,
        )
        .unwrap();
        assert!(!config.autoplay);
        assert_eq!(config.dialogue_interval_secs, 8);
        assert!(config.ambient_hearts);
    }

    #[test]
    fn roundtrips_through_toml() {
        let config = HanamiConfig {
            autoplay: false,
            dialogue_interval_secs: 3,
            ambient_hearts: false,
            file_logging: true,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: HanamiConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.dialogue_interval_secs, 3);
        assert!(back.file_logging);
        assert_eq!(back.dialogue_interval(), Duration::from_secs(3));
    }
}
