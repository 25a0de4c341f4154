//! CSV sink for correlated output rows
//!
//! Rows are written through the `csv` crate with a fixed header. Values
//! render at fixed decimal precision (position 6, angle 4, pdoa 6,
//! g-force 4) with trailing zeros trimmed down to one fractional digit,
//! so `3.6` stays `3.6` and `-2.0` stays `-2.0`. `format!` rounds the
//! exact binary value with ties to even; tests pin that policy.

use crate::domain::types::OutputRow;
use anyhow::Context;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Output column order; must not change, downstream plotting reads by name
const HEADER: [&str; 7] = ["x", "y", "ang_contr", "pdoa", "imu_x_g", "imu_y_g", "imu_z_g"];

const POSITION_PLACES: usize = 6;
const ANGLE_PLACES: usize = 4;
const PDOA_PLACES: usize = 6;
const G_FORCE_PLACES: usize = 4;

/// CSV writer for the correlated feature rows
pub struct CsvSink {
    writer: csv::Writer<File>,
    path: String,
    rows_written: usize,
}

impl CsvSink {
    /// Create the output file (parent directories included) and write
    /// the header row.
    pub fn create(path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output directory for {}", path))?;
            }
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path))?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(HEADER)
            .with_context(|| format!("Failed to write CSV header to {}", path))?;

        info!(path = %path, "csv_sink_created");
        Ok(Self { writer, path: path.to_string(), rows_written: 0 })
    }

    /// Write one row at fixed precision.
    pub fn write_row(&mut self, row: &OutputRow) -> anyhow::Result<()> {
        self.writer
            .write_record([
                fmt_fixed(row.x, POSITION_PLACES),
                fmt_fixed(row.y, POSITION_PLACES),
                fmt_fixed(row.ang_contr, ANGLE_PLACES),
                fmt_fixed(row.pdoa, PDOA_PLACES),
                fmt_fixed(row.g_x, G_FORCE_PLACES),
                fmt_fixed(row.g_y, G_FORCE_PLACES),
                fmt_fixed(row.g_z, G_FORCE_PLACES),
            ])
            .with_context(|| format!("Failed to write CSV row to {}", self.path))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and close the sink.
    pub fn finish(mut self) -> anyhow::Result<usize> {
        self.writer.flush().with_context(|| format!("Failed to flush {}", self.path))?;
        debug!(path = %self.path, rows = self.rows_written, "csv_sink_flushed");
        Ok(self.rows_written)
    }
}

/// Render `value` rounded to `places` decimals, trimming trailing zeros
/// but keeping at least one fractional digit.
fn fmt_fixed(value: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, value);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
