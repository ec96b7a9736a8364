//! Interaction tuning loaded from TOML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::input::Thresholds;

/// Movement in view points below which a single touch still counts as a tap
pub const DEFAULT_TAP_SLOP: f32 = 10.0;

/// Settings for the coordinator and the pointer tracker
///
/// ```toml
/// translate_assuming_infinite_plane = true
/// tap_slop = 10.0
///
/// [thresholds]
/// single_touch = 30.0
/// multi_touch = 60.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub thresholds: Thresholds,
    /// Treat detected planes as unbounded while dragging
    pub translate_assuming_infinite_plane: bool,
    pub tap_slop: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            translate_assuming_infinite_plane: true,
            tap_slop: DEFAULT_TAP_SLOP,
        }
    }
}

impl InteractionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: InteractionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded interaction config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let values = [
            ("thresholds.single_touch", self.thresholds.single_touch),
            ("thresholds.multi_touch", self.thresholds.multi_touch),
            ("tap_slop", self.tap_slop),
        ];
        for (name, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = InteractionConfig::from_toml_str("").unwrap();
        assert_eq!(config, InteractionConfig::default());
        assert_eq!(config.thresholds.single_touch, 30.0);
        assert_eq!(config.thresholds.multi_touch, 60.0);
        assert!(config.translate_assuming_infinite_plane);
    }

    #[test]
    fn test_partial_override() {
        let config = InteractionConfig::from_toml_str(
            "translate_assuming_infinite_plane = false\n[thresholds]\nmulti_touch = 80.0\n",
        )
        .unwrap();
        assert!(!config.translate_assuming_infinite_plane);
        assert_eq!(config.thresholds.single_touch, 30.0);
        assert_eq!(config.thresholds.multi_touch, 80.0);
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let content = "[thresholds]\nsingle_touch = 0.0\n";
        let err = InteractionConfig::from_toml_str(content).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold { name: "thresholds.single_touch", .. }
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "tap_slop = 4.5").unwrap();
        let config = InteractionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tap_slop, 4.5);

        let missing = InteractionConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = InteractionConfig::from_toml_str("tap_slop = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
