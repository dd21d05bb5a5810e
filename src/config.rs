//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Section and field names of the feed document live in `[fields]` because
//! the endpoint treats them as externally supplied constants, not protocol.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub feed: FeedConfig,
    #[serde(default)]
    pub fields: FieldConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Remote feed endpoint configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_refresh_interval_s")]
    pub refresh_interval_s: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Names of the feed document's sections and payload fields
#[derive(Debug, Deserialize, Clone)]
pub struct FieldConfig {
    #[serde(default = "default_readings_section")]
    pub readings_section: String,

    #[serde(default = "default_sensors_section")]
    pub sensors_section: String,

    #[serde(default = "default_label_field")]
    pub label_field: String,

    #[serde(default = "default_temperature_field")]
    pub temperature_field: String,

    #[serde(default = "default_battery_field")]
    pub battery_field: String,

    #[serde(default = "default_last_update_field")]
    pub last_update_field: String,
}

/// Low-battery alert configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    #[serde(default = "default_battery_threshold")]
    pub battery_threshold: f64,

    #[serde(default = "default_alert_message")]
    pub message: String,
}

/// Grid rendering configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_columns")]
    pub columns: usize,
}

// Default value functions
fn default_timeout_ms() -> u64 { 10000 }
fn default_refresh_interval_s() -> u64 { 300 }
fn default_user_agent() -> String {
    format!("sensor-board/{}", env!("CARGO_PKG_VERSION"))
}

fn default_readings_section() -> String { "readings".to_string() }
fn default_sensors_section() -> String { "sensors".to_string() }
fn default_label_field() -> String { "label".to_string() }
fn default_temperature_field() -> String { "temperature".to_string() }
fn default_battery_field() -> String { "battery".to_string() }
fn default_last_update_field() -> String { "last_update".to_string() }

fn default_battery_threshold() -> f64 { 15.0 }
fn default_alert_message() -> String { "battery is low and needs recharging".to_string() }

fn default_columns() -> usize { 2 }

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            readings_section: default_readings_section(),
            sensors_section: default_sensors_section(),
            label_field: default_label_field(),
            temperature_field: default_temperature_field(),
            battery_field: default_battery_field(),
            last_update_field: default_last_update_field(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            battery_threshold: default_battery_threshold(),
            message: default_alert_message(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { columns: default_columns() }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.feed.url.is_empty() {
            return Err(crate::error::SensorBoardError::Config(
                toml::de::Error::custom("feed url cannot be empty")
            ));
        }

        if self.feed.timeout_ms == 0 || self.feed.timeout_ms > 60000 {
            return Err(crate::error::SensorBoardError::Config(
                toml::de::Error::custom("timeout_ms must be between 1 and 60000")
            ));
        }

        if self.feed.refresh_interval_s == 0 {
            return Err(crate::error::SensorBoardError::Config(
                toml::de::Error::custom("refresh_interval_s must be greater than 0")
            ));
        }

        for (name, value) in [
            ("readings_section", &self.fields.readings_section),
            ("sensors_section", &self.fields.sensors_section),
            ("label_field", &self.fields.label_field),
            ("temperature_field", &self.fields.temperature_field),
            ("battery_field", &self.fields.battery_field),
            ("last_update_field", &self.fields.last_update_field),
        ] {
            if value.is_empty() {
                return Err(crate::error::SensorBoardError::Config(
                    toml::de::Error::custom(format!("{} cannot be empty", name))
                ));
            }
        }

        if self.alerts.battery_threshold < 0.0 || self.alerts.battery_threshold > 100.0 {
            return Err(crate::error::SensorBoardError::Config(
                toml::de::Error::custom("battery_threshold must be between 0.0 and 100.0")
            ));
        }

        if self.alerts.message.is_empty() {
            return Err(crate::error::SensorBoardError::Config(
                toml::de::Error::custom("alert message cannot be empty")
            ));
        }

        if self.display.columns == 0 {
            return Err(crate::error::SensorBoardError::Config(
                toml::de::Error::custom("display columns must be greater than 0")
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Config {
        Config {
            feed: FeedConfig {
                url: "http://example.com/feed.json".to_string(),
                timeout_ms: default_timeout_ms(),
                refresh_interval_s: default_refresh_interval_s(),
                user_agent: default_user_agent(),
            },
            fields: FieldConfig::default(),
            alerts: AlertConfig::default(),
            display: DisplayConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(create_valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_feed_url() {
        let mut config = create_valid_config();
        config.feed.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_ms_zero() {
        let mut config = create_valid_config();
        config.feed.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_ms_too_high() {
        let mut config = create_valid_config();
        config.feed.timeout_ms = 60001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_interval_zero() {
        let mut config = create_valid_config();
        config.feed.refresh_interval_s = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_field_name() {
        let mut config = create_valid_config();
        config.fields.label_field = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_battery_threshold_negative() {
        let mut config = create_valid_config();
        config.alerts.battery_threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_battery_threshold_too_high() {
        let mut config = create_valid_config();
        config.alerts.battery_threshold = 100.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_alert_message() {
        let mut config = create_valid_config();
        config.alerts.message = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_columns() {
        let mut config = create_valid_config();
        config.display.columns = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_field_names() {
        let fields = FieldConfig::default();
        assert_eq!(fields.readings_section, "readings");
        assert_eq!(fields.sensors_section, "sensors");
        assert_eq!(fields.label_field, "label");
        assert_eq!(fields.temperature_field, "temperature");
        assert_eq!(fields.battery_field, "battery");
        assert_eq!(fields.last_update_field, "last_update");
    }

    #[test]
    fn test_default_alert_values() {
        let alerts = AlertConfig::default();
        assert_eq!(alerts.battery_threshold, 15.0);
        assert!(!alerts.message.is_empty());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[feed]
url = "http://sensors.example.com/feed.json"

[alerts]
battery_threshold = 20.0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.feed.url, "http://sensors.example.com/feed.json");
        assert_eq!(config.alerts.battery_threshold, 20.0);
        // Omitted tables fall back to defaults
        assert_eq!(config.fields.readings_section, "readings");
        assert_eq!(config.display.columns, 2);
    }

    #[test]
    fn test_load_config_missing_feed_table() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[alerts]\n").unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }
}
