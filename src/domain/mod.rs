//! Domain models - log records and pure feature math
//!
//! This module contains the canonical data types and math used
//! throughout the correlator:
//! - `types` - parsed log line records, position fixes, matches, output rows
//! - `decode` - two's-complement and g-force decoding of IMU hex payloads
//! - `geometry` - bearing angle relative to the antenna origin

pub mod decode;
pub mod geometry;
pub mod types;

// Re-export commonly used types at module level
pub use types::{Match, OutputRow, PositionFix, SerialRecord};
