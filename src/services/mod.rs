//! Services - correlation logic
//!
//! This module contains the core correlation machinery:
//! - `indexer` - sorted per-stream index with nearest-neighbor lookup
//! - `correlator` - the batch driver aligning fixes, IMU and AoA streams

pub mod correlator;
pub mod indexer;

// Re-export commonly used types
pub use correlator::{Correlator, RunReport};
pub use indexer::StreamIndex;
