//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Payload Model
//! - Messages are opaque byte sequences; the bus does not interpret them
//! - Batch boundaries do not align with message boundaries - consumers self-delimit

mod config;
mod error;
mod transport;

pub use config::*;
pub use error::*;
pub use transport::*;
