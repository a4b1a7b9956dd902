//! Concurrent producer load driver over one shared writer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use contracts::BusTransport;
use writer::{BusMessageWriter, CancelSignal, WriterError};

/// Load generator settings
#[derive(Debug, Clone, Copy)]
pub struct LoadSettings {
    /// Number of concurrent producer tasks
    pub producers: usize,
    /// Messages per producer
    pub messages_per_producer: usize,
    /// Message size in bytes
    pub message_size: usize,
}

/// Totals reported by one load run
#[derive(Debug, Clone, Copy)]
pub struct LoadSummary {
    /// Messages accepted by the writer
    pub messages_sent: u64,
    /// Messages abandoned because the run was cancelled
    pub messages_cancelled: u64,
    /// Bytes accepted by the writer (sum over accepted messages)
    pub bytes_submitted: u64,
    /// Wall time of the run
    pub duration: Duration,
}

/// Drive `producers` concurrent tasks through the shared writer
///
/// Each task sends `messages_per_producer` messages filled with its own
/// task id, so published batches remain attributable. Cancellation stops
/// producers at the next send; bytes already accepted stay buffered for
/// the caller's final dispose.
pub async fn drive_producers<T>(
    writer: Arc<BusMessageWriter<T>>,
    settings: LoadSettings,
    cancel: CancelSignal,
) -> LoadSummary
where
    T: BusTransport + Send + Sync + 'static,
{
    let started = Instant::now();
    let messages_sent = Arc::new(AtomicU64::new(0));
    let messages_cancelled = Arc::new(AtomicU64::new(0));
    let bytes_submitted = Arc::new(AtomicU64::new(0));

    let mut tasks = Vec::with_capacity(settings.producers);
    for producer_id in 0..settings.producers {
        let writer = Arc::clone(&writer);
        let cancel = cancel.clone();
        let messages_sent = Arc::clone(&messages_sent);
        let messages_cancelled = Arc::clone(&messages_cancelled);
        let bytes_submitted = Arc::clone(&bytes_submitted);

        tasks.push(tokio::spawn(async move {
            let message = vec![producer_id as u8; settings.message_size];

            for seq in 0..settings.messages_per_producer {
                match writer.send(&message, &cancel).await {
                    Ok(()) => {
                        messages_sent.fetch_add(1, Ordering::Relaxed);
                        bytes_submitted.fetch_add(message.len() as u64, Ordering::Relaxed);
                        observability::record_send(message.len());
                        observability::record_buffered_bytes(writer.metrics().buffered_bytes());
                    }
                    Err(WriterError::Cancelled) => {
                        let remaining = (settings.messages_per_producer - seq) as u64;
                        messages_cancelled.fetch_add(remaining, Ordering::Relaxed);
                        observability::record_cancelled_wait();
                        debug!(producer_id, seq, "producer cancelled");
                        break;
                    }
                    Err(e) => {
                        // Failed publishes keep the bytes buffered; the
                        // message itself was still accepted.
                        warn!(producer_id, seq, error = %e, "send failed");
                        messages_sent.fetch_add(1, Ordering::Relaxed);
                        bytes_submitted.fetch_add(message.len() as u64, Ordering::Relaxed);
                        observability::record_send(message.len());
                    }
                }
            }
        }));
    }

    for task in tasks {
        if let Err(e) = task.await {
            warn!(error = ?e, "producer task panicked");
        }
    }

    LoadSummary {
        messages_sent: messages_sent.load(Ordering::Relaxed),
        messages_cancelled: messages_cancelled.load(Ordering::Relaxed),
        bytes_submitted: bytes_submitted.load(Ordering::Relaxed),
        duration: started.elapsed(),
    }
}
