//! BusTransport trait - writer output interface
//!
//! Defines the abstract interface for message-bus endpoints.

use bytes::Bytes;

use crate::BusError;

/// Bus endpoint trait
///
/// All transport implementations must implement this trait. A transport
/// handle may be shared by several components and must be independently
/// thread-safe; the writer guarantees at most one in-flight `publish` call
/// per writer instance.
#[trait_variant::make(BusTransport: Send)]
pub trait LocalBusTransport {
    /// Transport name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Publish one batch of bytes to the bus
    ///
    /// The payload may concatenate several submitted messages; batch
    /// boundaries carry no framing information.
    ///
    /// # Errors
    /// Returns a publish error on failure; no partial-success signaling.
    async fn publish(&self, payload: Bytes) -> Result<(), BusError>;
}
