//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce a `BusConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("config.toml")).unwrap();
//! println!("Transport: {}", config.transport.name);
//! ```

mod parser;
mod validator;

pub use contracts::BusConfig;
pub use parser::ConfigFormat;

use contracts::BusError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<BusConfig, BusError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<BusConfig, BusError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Serialize BusConfig to TOML string
    pub fn to_toml(config: &BusConfig) -> Result<String, BusError> {
        toml::to_string_pretty(config)
            .map_err(|e| BusError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize BusConfig to JSON string
    pub fn to_json(config: &BusConfig) -> Result<String, BusError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| BusError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, BusError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| BusError::config_parse("cannot determine file format from extension"))?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| BusError::config_parse(format!("unsupported config format: .{ext}")))
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, BusError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::TransportType;

    const MINIMAL_TOML: &str = r#"
[writer]
flush_threshold_bytes = 4096

[transport]
name = "main"
transport_type = "udp"
[transport.params]
addr = "127.0.0.1:9100"
"#;

    #[test]
    fn test_load_minimal_toml() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(config.writer.flush_threshold_bytes, 4096);
        assert_eq!(config.transport.transport_type, TransportType::Udp);
    }

    #[test]
    fn test_load_json() {
        let content = r#"{
            "writer": { "flush_threshold_bytes": 256 },
            "transport": { "name": "log", "transport_type": "log" }
        }"#;
        let config = ConfigLoader::load_from_str(content, ConfigFormat::Json).unwrap();
        assert_eq!(config.writer.flush_threshold_bytes, 256);
        assert_eq!(config.transport.transport_type, TransportType::Log);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let content = r#"
[writer]
flush_threshold_bytes = 0

[transport]
name = "log"
transport_type = "log"
"#;
        let err = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, BusError::ConfigValidation { .. }));
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&config).unwrap();
        let back = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(back.writer.flush_threshold_bytes, 4096);
    }

    #[test]
    fn test_unknown_extension() {
        let err = ConfigLoader::load_from_path(Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, BusError::ConfigParse { .. }));
    }
}
