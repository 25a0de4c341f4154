//! IO modules - filesystem interfaces
//!
//! This module contains all file I/O:
//! - `loader` - JSONL readers for the serial and positioning logs
//! - `csv_out` - CSV sink for correlated output rows

pub mod csv_out;
pub mod loader;

// Re-export commonly used types
pub use csv_out::CsvSink;
pub use loader::{load_position_fixes, load_serial, ResultsLoad, SerialLoad};
