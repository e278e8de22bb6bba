//! Configuration file support for DoseMate.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/dosemate/config.toml`.
//! Application state itself is never persisted; the config file only holds
//! display preferences and the patient/caregiver details from the settings
//! panel.

use crate::{Error, Result, TimeFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub preferences: PreferencesConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub caregiver: CaregiverConfig,

    #[serde(default)]
    pub emergency: EmergencyConfig,
}

/// Display and alerting preferences
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default)]
    pub time_format: TimeFormat,

    #[serde(default = "default_low_inventory_threshold")]
    pub low_inventory_threshold: u32,

    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            low_inventory_threshold: default_low_inventory_threshold(),
            notifications_enabled: default_notifications_enabled(),
        }
    }
}

/// Patient profile details
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub age: Option<u32>,

    /// Free-form medical notes (allergies, sensitivities)
    #[serde(default)]
    pub notes: String,
}

/// Caregiver contact details
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CaregiverConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub contact: String,
}

/// Emergency contact details
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct EmergencyConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: String,
}

// Default value functions
fn default_low_inventory_threshold() -> u32 {
    crate::store::DEFAULT_LOW_INVENTORY_THRESHOLD
}

fn default_notifications_enabled() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
        base.join("dosemate").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.preferences.time_format, TimeFormat::TwelveHour);
        assert_eq!(config.preferences.low_inventory_threshold, 5);
        assert!(config.preferences.notifications_enabled);
        assert!(config.profile.name.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.preferences.time_format = TimeFormat::TwentyFourHour;
        config.profile.name = "Aditya".into();
        config.profile.age = Some(28);

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.preferences.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(parsed.profile.name, "Aditya");
        assert_eq!(parsed.profile.age, Some(28));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[preferences]
time_format = "24h"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.preferences.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(config.preferences.low_inventory_threshold, 5); // default
    }

    #[test]
    fn test_save_and_load_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.caregiver.name = "Ramesh".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.caregiver.name, "Ramesh");
    }
}
