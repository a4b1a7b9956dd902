//! ExclusionGate - single-holder access to an owned value
//!
//! The protected value lives inside the gate; it is only reachable through
//! a successful `acquire`, so it can never be touched outside the critical
//! section. Release is RAII: dropping the guard releases the gate on every
//! exit path, including error paths of the protected work.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::cancel::CancelSignal;

/// Gate acquisition failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// Cancel signal fired before the gate was acquired; nothing was mutated
    #[error("cancelled while waiting for gate")]
    Cancelled,

    /// Gate was closed; no further acquisition is possible
    #[error("gate is closed")]
    Closed,
}

/// Single-holder mutual-exclusion gate owning the value it protects
///
/// No ordering guarantee among concurrent waiters.
#[derive(Debug)]
pub struct ExclusionGate<T> {
    inner: Mutex<T>,
    closed: AtomicBool,
}

impl<T> ExclusionGate<T> {
    /// Create an open gate around `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
            closed: AtomicBool::new(false),
        }
    }

    /// Suspend until the gate is free or the cancel signal fires first
    ///
    /// On cancellation, fails with [`GateError::Cancelled`] and no side
    /// effect occurred. After [`ExclusionGate::close`], fails fast with
    /// [`GateError::Closed`].
    pub async fn acquire(&self, cancel: &CancelSignal) -> Result<MutexGuard<'_, T>, GateError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(GateError::Closed);
        }
        if cancel.is_cancelled() {
            return Err(GateError::Cancelled);
        }

        let mut cancel = cancel.clone();
        let guard = tokio::select! {
            guard = self.inner.lock() => guard,
            () = cancel.cancelled() => return Err(GateError::Cancelled),
        };

        // A close may have raced the wait; holders must not observe a
        // closed gate as open.
        if self.closed.load(Ordering::Acquire) {
            return Err(GateError::Closed);
        }
        Ok(guard)
    }

    /// Close the gate; returns whether this call performed the transition
    ///
    /// Idempotent. Waiters and later callers fail with [`GateError::Closed`].
    pub fn close(&self) -> bool {
        !self.closed.swap(true, Ordering::AcqRel)
    }
}
