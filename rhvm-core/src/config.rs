use crate::error::{Result, RhvmError};
use crate::types::ApiVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub thresholds: CapabilityThresholds,
}

/// First provider API version exposing `unregister` on the VM service.
pub const NATIVE_UNREGISTER_MIN_VERSION: u32 = 4;

/// Minimum provider API versions that unlock each version-gated feature.
///
/// Each threshold is checked on its own; meeting one says nothing about the
/// others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityThresholds {
    pub reconfigure_disks_min_version: u32,
    pub publish_min_version: u32,
    pub unregister_min_version: u32,
}

impl CapabilityThresholds {
    pub fn reconfigure_disks(&self) -> ApiVersion {
        ApiVersion(self.reconfigure_disks_min_version)
    }

    pub fn publish(&self) -> ApiVersion {
        ApiVersion(self.publish_min_version)
    }

    /// Never below [`NATIVE_UNREGISTER_MIN_VERSION`]; older APIs have no
    /// deregistration path.
    pub fn unregister(&self) -> ApiVersion {
        ApiVersion(self.unregister_min_version.max(NATIVE_UNREGISTER_MIN_VERSION))
    }
}

impl Default for CapabilityThresholds {
    fn default() -> Self {
        Self {
            reconfigure_disks_min_version: 3,
            publish_min_version: 4,
            unregister_min_version: NATIVE_UNREGISTER_MIN_VERSION,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| RhvmError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(config_dir) = path.parent() {
            std::fs::create_dir_all(config_dir)?;
        }

        let content =
            serde_yaml::to_string(self).map_err(|e| RhvmError::ConfigError(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RhvmError::ConfigError("Cannot determine home directory".to_string()))?;
        Ok(home.join(".rhvm").join("config.yaml"))
    }

    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("reconfigure_disks_min_version", self.thresholds.reconfigure_disks_min_version),
            ("publish_min_version", self.thresholds.publish_min_version),
            ("unregister_min_version", self.thresholds.unregister_min_version),
        ];

        for (name, value) in thresholds {
            if value == 0 {
                return Err(RhvmError::ConfigError(format!(
                    "{name} must be a positive API version"
                )));
            }
        }

        if self.thresholds.unregister_min_version < NATIVE_UNREGISTER_MIN_VERSION {
            return Err(RhvmError::ConfigError(format!(
                "unregister_min_version must be at least {NATIVE_UNREGISTER_MIN_VERSION}"
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            thresholds: CapabilityThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.thresholds.publish_min_version = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.thresholds.publish(), ApiVersion(5));
    }

    #[test]
    fn test_missing_thresholds_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "version: \"1.0\"\nthresholds:\n  publish_min_version: 6\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.thresholds.publish_min_version, 6);
        assert_eq!(loaded.thresholds.reconfigure_disks_min_version, 3);
        assert_eq!(loaded.thresholds.unregister_min_version, 4);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let mut config = Config::default();
        config.thresholds.unregister_min_version = 0;
        assert!(matches!(config.validate(), Err(RhvmError::ConfigError(_))));
    }

    #[test]
    fn test_unregister_below_native_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "version: \"1.0\"\nthresholds:\n  unregister_min_version: 1\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(RhvmError::ConfigError(_))
        ));
    }

    #[test]
    fn test_unregister_threshold_has_native_floor() {
        let thresholds = CapabilityThresholds {
            unregister_min_version: 2,
            ..CapabilityThresholds::default()
        };
        assert_eq!(thresholds.unregister(), ApiVersion(4));

        let later = CapabilityThresholds {
            unregister_min_version: 5,
            ..CapabilityThresholds::default()
        };
        assert_eq!(later.unregister(), ApiVersion(5));
    }
}
