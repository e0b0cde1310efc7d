//! Persistent configuration for axpoint.
//!
//! Stores user settings in `~/.axpoint/config.json`: the default screen size
//! used when none is given on the command line, the reserved-keyword margin,
//! the platform label, and the preferred network interface.
//!
//! # Example
//!
//! ```no_run
//! use axpoint_core::config::AxpointConfig;
//!
//! // Load (returns defaults if file doesn't exist)
//! let config = AxpointConfig::load();
//!
//! if let Some(screen) = config.screen {
//!     println!("Screen: {}x{}", screen.width, screen.height);
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::point::ScreenSize;
use crate::reserved::{Platform, ReservedGeometry};

const CONFIG_DIRNAME: &str = ".axpoint";
const CONFIG_FILENAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Persistent axpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AxpointConfig {
    /// Screen size used for reserved keywords when the caller gives none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenSize>,

    /// Overrides the default reserved-keyword margin ratio of `0.2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_ratio: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Interface whose address is reported first when it qualifies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_interface: Option<String>,
}

/// Returns `~/.axpoint/config.json`, or `None` without a home directory.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIRNAME).join(CONFIG_FILENAME))
}

impl AxpointConfig {
    /// Load config from `~/.axpoint/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save config to `~/.axpoint/config.json`.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path().ok_or(ConfigError::NoHomeDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Builds the reserved-keyword geometry from this config.
    pub fn geometry(&self) -> ReservedGeometry {
        let mut geometry = ReservedGeometry::default();
        if let Some(ratio) = self.margin_ratio {
            geometry = geometry.with_margin_ratio(ratio);
        }
        geometry.platform = self.platform.clone();
        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reserved::DEFAULT_MARGIN_RATIO;

    #[test]
    fn test_default_config_is_empty() {
        let config = AxpointConfig::default();
        assert!(config.screen.is_none());
        assert!(config.preferred_interface.is_none());
        assert_eq!(config.geometry(), ReservedGeometry::default());
    }

    #[test]
    fn test_deserialize_empty_json() {
        let loaded: AxpointConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded, AxpointConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);
        let config = AxpointConfig {
            screen: Some(ScreenSize::new(390.0, 844.0)),
            margin_ratio: Some(0.1),
            platform: Some(Platform::Ios),
            preferred_interface: Some("en0".to_string()),
        };

        config.save_to(&path).unwrap();
        let loaded = AxpointConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"platform\": \"ios\""));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AxpointConfig::load_from(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(AxpointConfig::load_from(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_geometry_from_config() {
        let config = AxpointConfig {
            margin_ratio: Some(0.25),
            platform: Some(Platform::Android),
            ..Default::default()
        };
        let geometry = config.geometry();
        assert_eq!(geometry.margin_ratio, 0.25);
        assert_eq!(geometry.platform, Some(Platform::Android));

        let geometry = AxpointConfig::default().geometry();
        assert_eq!(geometry.margin_ratio, DEFAULT_MARGIN_RATIO);
    }

    #[test]
    fn test_load_does_not_panic() {
        let _ = AxpointConfig::load();
    }
}
