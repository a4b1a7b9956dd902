//! # Transports
//!
//! Concrete `BusTransport` endpoints.
//!
//! Endpoints receive opaque batches; batch boundaries carry no message
//! framing, so whatever consumes these payloads must self-delimit.

mod log;
mod recording;
mod udp;

pub use contracts::{BusError, BusTransport, TransportConfig, TransportType};
pub use log::LogTransport;
pub use recording::RecordingTransport;
pub use udp::{UdpTransport, UdpTransportConfig};
