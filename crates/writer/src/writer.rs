//! BusMessageWriter - send/flush/dispose state machine
//!
//! The critical section {append, threshold check, publish} is one atomic
//! unit with respect to every other send/flush on the same writer: the
//! buffer lives inside the gate and the publish call is awaited while the
//! gate is still held.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use contracts::{BusTransport, WriterSettings};

use crate::accumulator::ByteAccumulator;
use crate::cancel::CancelSignal;
use crate::error::WriterError;
use crate::gate::{ExclusionGate, GateError};
use crate::metrics::WriterMetrics;

/// Concurrency-safe buffering writer in front of a bus transport
///
/// Any number of tasks may call [`send`](Self::send) and
/// [`flush`](Self::flush) concurrently through a shared reference.
/// Disposal is the owner's responsibility: exactly one
/// [`dispose`](Self::dispose) call, with no send/flush in flight when it
/// begins. Send/flush invoked after disposal fail fast with
/// [`WriterError::Disposed`].
pub struct BusMessageWriter<T> {
    flush_threshold: usize,
    transport: Arc<T>,
    gate: ExclusionGate<ByteAccumulator>,
    disposed: AtomicBool,
    metrics: WriterMetrics,
}

impl<T: BusTransport> BusMessageWriter<T> {
    /// Create a writer over `transport`
    ///
    /// # Errors
    /// Rejects a zero flush threshold.
    pub fn new(settings: WriterSettings, transport: Arc<T>) -> Result<Self, WriterError> {
        if settings.flush_threshold_bytes == 0 {
            return Err(WriterError::Config(contracts::BusError::config_validation(
                "writer.flush_threshold_bytes",
                "must be >= 1",
            )));
        }

        Ok(Self {
            flush_threshold: settings.flush_threshold_bytes,
            gate: ExclusionGate::new(ByteAccumulator::with_capacity(
                settings.flush_threshold_bytes,
            )),
            transport,
            disposed: AtomicBool::new(false),
            metrics: WriterMetrics::new(),
        })
    }

    /// Configured flush threshold in bytes
    pub fn flush_threshold(&self) -> usize {
        self.flush_threshold
    }

    /// Writer metrics
    pub fn metrics(&self) -> &WriterMetrics {
        &self.metrics
    }

    /// Append `message` and publish the batch if the threshold is reached
    ///
    /// The message is appended whole; it is never split across two publish
    /// calls. A message whose size alone reaches the threshold still goes
    /// through the buffer and is published as one oversized batch, possibly
    /// combined with previously buffered smaller messages.
    ///
    /// # Errors
    /// - [`WriterError::Cancelled`] if `cancel` fired while waiting for the
    ///   gate; the buffer is untouched
    /// - [`WriterError::Disposed`] after disposal
    /// - [`WriterError::Transport`] if the triggered publish failed; the
    ///   buffer still holds the unpublished bytes, including `message`
    #[instrument(
        name = "writer_send",
        skip(self, message, cancel),
        fields(transport = %self.transport.name(), len = message.len())
    )]
    pub async fn send(&self, message: &[u8], cancel: &CancelSignal) -> Result<(), WriterError> {
        self.send_internal(Some(message), false, cancel).await
    }

    /// Publish the current buffer contents irrespective of the threshold
    ///
    /// No-op if the buffer is empty. Same gate, atomicity and failure
    /// semantics as the threshold-triggered publish inside `send`.
    #[instrument(
        name = "writer_flush",
        skip(self, cancel),
        fields(transport = %self.transport.name())
    )]
    pub async fn flush(&self, cancel: &CancelSignal) -> Result<(), WriterError> {
        self.send_internal(None, true, cancel).await
    }

    /// Blocking convenience wrapper over [`flush`](Self::flush)
    ///
    /// Must be called from a multi-thread tokio runtime context.
    pub fn flush_blocking(&self) -> Result<(), WriterError> {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(self.flush(&CancelSignal::never()))
        })
    }

    /// Dispose the writer: best-effort final flush, then close the gate
    ///
    /// Idempotent; a second call performs no flush and returns `Ok`. The
    /// gate is closed even when the final flush fails, and the flush error
    /// is returned after cleanup completed. Not synchronized against
    /// concurrent send/flush: the owner must guarantee no other call is in
    /// flight when disposal begins.
    #[instrument(name = "writer_dispose", skip(self), fields(transport = %self.transport.name()))]
    pub async fn dispose(&self) -> Result<(), WriterError> {
        if self.disposed.swap(true, Ordering::AcqRel) {
            trace!("already disposed");
            return Ok(());
        }

        let result = self.send_internal_unchecked(None, true, &CancelSignal::never()).await;
        // Cleanup must run even when the final flush failed.
        self.gate.close();
        debug!(ok = result.is_ok(), "writer disposed");
        result
    }

    /// Blocking convenience wrapper over [`dispose`](Self::dispose)
    ///
    /// Must be called from a multi-thread tokio runtime context.
    pub fn dispose_blocking(&self) -> Result<(), WriterError> {
        tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(self.dispose()))
    }

    async fn send_internal(
        &self,
        message: Option<&[u8]>,
        force: bool,
        cancel: &CancelSignal,
    ) -> Result<(), WriterError> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(WriterError::Disposed);
        }
        self.send_internal_unchecked(message, force, cancel).await
    }

    /// Critical section body; the guard releases the gate on every exit path
    async fn send_internal_unchecked(
        &self,
        message: Option<&[u8]>,
        force: bool,
        cancel: &CancelSignal,
    ) -> Result<(), WriterError> {
        let mut buffer = match self.gate.acquire(cancel).await {
            Ok(guard) => guard,
            Err(GateError::Cancelled) => {
                self.metrics.inc_cancelled_count();
                return Err(WriterError::Cancelled);
            }
            Err(GateError::Closed) => return Err(WriterError::Disposed),
        };

        if let Some(message) = message {
            buffer.append(message);
            self.metrics.inc_send_count();
        }

        let result = if force || buffer.len() >= self.flush_threshold {
            self.publish_locked(&mut buffer).await
        } else {
            Ok(())
        };

        self.metrics.set_buffered_bytes(buffer.len());
        result
    }

    /// Publish the buffer contents; clear iff the publish succeeded
    async fn publish_locked(&self, buffer: &mut ByteAccumulator) -> Result<(), WriterError> {
        if buffer.is_empty() {
            return Ok(());
        }

        let payload = buffer.snapshot();
        let batch_len = payload.len();

        match self.transport.publish(payload).await {
            Ok(()) => {
                buffer.reset();
                self.metrics.record_publish(batch_len);
                trace!(bytes = batch_len, "batch published");
                Ok(())
            }
            Err(e) => {
                // Buffer left intact; a later flush retries the same bytes.
                self.metrics.inc_failure_count();
                Err(WriterError::Transport(e))
            }
        }
    }
}

impl<T> std::fmt::Debug for BusMessageWriter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusMessageWriter")
            .field("flush_threshold", &self.flush_threshold)
            .field("disposed", &self.disposed.load(Ordering::Relaxed))
            .finish()
    }
}
