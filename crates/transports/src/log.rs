//! LogTransport - logs batch summaries via tracing

use bytes::Bytes;
use contracts::{BusError, BusTransport};
use tracing::{info, instrument};

/// Transport that logs batch summaries for debugging; never fails
pub struct LogTransport {
    name: String,
}

impl LogTransport {
    /// Create a new LogTransport with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl BusTransport for LogTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_transport_publish",
        skip(self, payload),
        fields(transport = %self.name, bytes = payload.len())
    )]
    async fn publish(&self, payload: Bytes) -> Result<(), BusError> {
        info!(
            transport = %self.name,
            bytes = payload.len(),
            "batch published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_transport_publish() {
        let transport = LogTransport::new("test_log");
        let result = transport.publish(Bytes::from_static(b"payload")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_transport_name() {
        let transport = LogTransport::new("my_logger");
        assert_eq!(transport.name(), "my_logger");
    }
}
