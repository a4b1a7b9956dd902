//! Bus writer configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    /// Writer configuration
    #[serde(default)]
    pub writer: WriterSettings,

    /// Transport endpoint configuration
    pub transport: TransportConfig,
}

/// Writer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriterSettings {
    /// Byte count at or above which an append triggers a publish.
    /// Also used as the initial buffer capacity hint; the buffer may
    /// grow past it to hold an oversized message.
    pub flush_threshold_bytes: usize,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            flush_threshold_bytes: 64 * 1024,
        }
    }
}

/// Transport endpoint kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    /// Log batches via tracing (debugging)
    Log,
    /// UDP datagram per batch
    Udp,
    /// In-memory recording (tests/demos)
    Recording,
}

/// Transport endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Transport name (used for logging/metrics)
    pub name: String,

    /// Endpoint kind
    pub transport_type: TransportType,

    /// Type-specific parameters (e.g. "addr" for udp)
    #[serde(default)]
    pub params: HashMap<String, String>,
}
