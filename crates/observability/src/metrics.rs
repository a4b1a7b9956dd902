//! Writer metrics recording
//!
//! Free functions over the `metrics` facade; callers wire them to writer
//! events (send accepted, batch published, publish failed, wait cancelled).

use metrics::{counter, gauge, histogram};

/// Record a message accepted by send
pub fn record_send(bytes: usize) {
    counter!("bus_writer_messages_total").increment(1);
    counter!("bus_writer_bytes_submitted_total").increment(bytes as u64);
    histogram!("bus_writer_message_bytes").record(bytes as f64);
}

/// Record a successfully published batch
pub fn record_publish(batch_bytes: usize) {
    counter!("bus_writer_publishes_total").increment(1);
    counter!("bus_writer_bytes_published_total").increment(batch_bytes as u64);
    histogram!("bus_writer_batch_bytes").record(batch_bytes as f64);
}

/// Record a failed publish call
pub fn record_publish_failure() {
    counter!("bus_writer_publish_failures_total").increment(1);
}

/// Record a gate wait cancelled before entry
pub fn record_cancelled_wait() {
    counter!("bus_writer_cancelled_waits_total").increment(1);
}

/// Record the current buffered byte count
pub fn record_buffered_bytes(len: usize) {
    gauge!("bus_writer_buffered_bytes").set(len as f64);
}
