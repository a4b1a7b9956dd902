//! Layered error definitions
//!
//! Categorized by source: config / transport / general

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum BusError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Transport Errors =====
    /// Transport connection error
    #[error("transport '{transport}' connection error: {message}")]
    TransportConnect { transport: String, message: String },

    /// Transport publish error
    #[error("transport '{transport}' publish error: {message}")]
    TransportPublish { transport: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl BusError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create transport connection error
    pub fn transport_connect(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportConnect {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Create transport publish error
    pub fn transport_publish(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportPublish {
            transport: transport.into(),
            message: message.into(),
        }
    }
}
