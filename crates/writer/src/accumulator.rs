//! ByteAccumulator - bytes held between flushes
//!
//! Pure data structure with no locking of its own; exclusive access is
//! provided entirely by the caller holding the gate.

use bytes::{Bytes, BytesMut};

/// Append-only byte buffer with snapshot-and-reset
///
/// Capacity is hinted by the flush threshold but unbounded: an oversized
/// message is appended whole and the buffer grows to hold it.
#[derive(Debug)]
pub struct ByteAccumulator {
    buf: BytesMut,
}

impl ByteAccumulator {
    /// Create an accumulator with a pre-allocated capacity hint
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Append bytes to the tail, growing as needed; never fails
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Current byte count, O(1)
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer holds no bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Independent copy of the current contents, without resetting
    ///
    /// The snapshot does not alias the buffer, so an append after the gate
    /// is released cannot corrupt an in-flight publish.
    pub fn snapshot(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buf)
    }

    /// Set length to zero, keeping allocated capacity
    ///
    /// Called only after a publish over the prior snapshot has succeeded.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}
