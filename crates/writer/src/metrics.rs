//! Writer metrics for observability

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Metrics for a single writer
#[derive(Debug, Default)]
pub struct WriterMetrics {
    /// Bytes currently buffered (updated on gate exit)
    buffered_bytes: AtomicUsize,
    /// Total messages accepted by send
    send_count: AtomicU64,
    /// Total successful publish calls
    publish_count: AtomicU64,
    /// Total bytes accepted by the transport
    published_bytes: AtomicU64,
    /// Total publish failures
    failure_count: AtomicU64,
    /// Total waits cancelled before entry
    cancelled_count: AtomicU64,
}

impl WriterMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently buffered
    pub fn buffered_bytes(&self) -> usize {
        self.buffered_bytes.load(Ordering::Relaxed)
    }

    pub(crate) fn set_buffered_bytes(&self, len: usize) {
        self.buffered_bytes.store(len, Ordering::Relaxed);
    }

    /// Total messages accepted by send
    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_send_count(&self) {
        self.send_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Total successful publish calls
    pub fn publish_count(&self) -> u64 {
        self.publish_count.load(Ordering::Relaxed)
    }

    /// Total bytes accepted by the transport
    pub fn published_bytes(&self) -> u64 {
        self.published_bytes.load(Ordering::Relaxed)
    }

    pub(crate) fn record_publish(&self, bytes: usize) {
        self.publish_count.fetch_add(1, Ordering::Relaxed);
        self.published_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Total publish failures
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Total waits cancelled before entry
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled_count.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_cancelled_count(&self) {
        self.cancelled_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> WriterMetricsSnapshot {
        WriterMetricsSnapshot {
            buffered_bytes: self.buffered_bytes(),
            send_count: self.send_count(),
            publish_count: self.publish_count(),
            published_bytes: self.published_bytes(),
            failure_count: self.failure_count(),
            cancelled_count: self.cancelled_count(),
        }
    }
}

/// Snapshot of writer metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct WriterMetricsSnapshot {
    pub buffered_bytes: usize,
    pub send_count: u64,
    pub publish_count: u64,
    pub published_bytes: u64,
    pub failure_count: u64,
    pub cancelled_count: u64,
}
