//! # Writer
//!
//! Buffering bus message writer.
//!
//! Responsibilities:
//! - Accumulate small messages into fewer, larger `publish` calls
//! - Serialize arbitrarily many concurrent producers through one gate
//! - Cancelable waiting, deterministic drain on dispose
//!
//! There is no background sender task: transport I/O runs inside the
//! critical section of whichever caller crossed the flush threshold. A
//! decoupled sender fed by an internal queue is the natural next iteration
//! if head-of-line blocking becomes a problem.

mod accumulator;
mod cancel;
mod error;
mod gate;
mod metrics;
mod writer;

pub use accumulator::ByteAccumulator;
pub use cancel::{CancelHandle, CancelSignal};
pub use error::WriterError;
pub use gate::{ExclusionGate, GateError};
pub use metrics::{WriterMetrics, WriterMetricsSnapshot};
pub use writer::BusMessageWriter;

pub use contracts::{BusError, BusTransport, WriterSettings};
