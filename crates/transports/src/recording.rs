//! RecordingTransport - in-memory endpoint for tests and demos

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use contracts::{BusError, BusTransport};

/// Transport that records every published batch
///
/// Cheaply cloneable; clones share the same recording, so a test can keep
/// one handle for assertions while the writer owns another. Can be switched
/// into a failing mode to exercise retention-on-failure paths.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    payloads: Mutex<Vec<Bytes>>,
    total_bytes: AtomicU64,
    publish_count: AtomicU64,
    should_fail: AtomicBool,
}

impl RecordingTransport {
    /// Create an empty recording transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch failure injection on or off
    pub fn set_failing(&self, failing: bool) {
        self.inner.should_fail.store(failing, Ordering::Relaxed);
    }

    /// All recorded batch payloads, in publish order
    pub fn payloads(&self) -> Vec<Bytes> {
        self.inner.payloads.lock().unwrap().clone()
    }

    /// Number of successful publish calls
    pub fn publish_count(&self) -> u64 {
        self.inner.publish_count.load(Ordering::Relaxed)
    }

    /// Total bytes accepted across all publish calls
    pub fn total_bytes(&self) -> u64 {
        self.inner.total_bytes.load(Ordering::Relaxed)
    }
}

impl BusTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn publish(&self, payload: Bytes) -> Result<(), BusError> {
        if self.inner.should_fail.load(Ordering::Relaxed) {
            return Err(BusError::transport_publish("recording", "injected failure"));
        }

        self.inner
            .total_bytes
            .fetch_add(payload.len() as u64, Ordering::Relaxed);
        self.inner.publish_count.fetch_add(1, Ordering::Relaxed);
        self.inner.payloads.lock().unwrap().push(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_payloads_in_order() {
        let transport = RecordingTransport::new();
        transport.publish(Bytes::from_static(b"one")).await.unwrap();
        transport.publish(Bytes::from_static(b"two")).await.unwrap();

        let payloads = transport.payloads();
        assert_eq!(payloads.len(), 2);
        assert_eq!(&payloads[0][..], b"one");
        assert_eq!(&payloads[1][..], b"two");
        assert_eq!(transport.total_bytes(), 6);
        assert_eq!(transport.publish_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let transport = RecordingTransport::new();
        transport.set_failing(true);

        let err = transport.publish(Bytes::from_static(b"x")).await.unwrap_err();
        assert!(matches!(err, BusError::TransportPublish { .. }));
        assert_eq!(transport.publish_count(), 0);

        transport.set_failing(false);
        transport.publish(Bytes::from_static(b"x")).await.unwrap();
        assert_eq!(transport.publish_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_recording() {
        let transport = RecordingTransport::new();
        let observer = transport.clone();

        transport.publish(Bytes::from_static(b"shared")).await.unwrap();
        assert_eq!(observer.total_bytes(), 6);
    }
}
