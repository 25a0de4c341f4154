//! Correlation driver
//!
//! Single batch pass over both logs:
//! load the position fixes, load and index the serial log, then walk
//! the matches in serial-log order emitting one CSV row each. A missing
//! input file aborts before any output is produced; everything after
//! that degrades per-row to documented defaults.

use crate::domain::decode::g_triplet;
use crate::domain::geometry::{bearing_angle, snap_to_grid};
use crate::domain::types::{Match, OutputRow, PositionFix};
use crate::infra::Config;
use crate::io::loader::{load_position_fixes, load_serial, SerialLoad};
use crate::io::CsvSink;
use tracing::{debug, info};

/// Counters reported after a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub fixes_loaded: usize,
    pub imu_records: usize,
    pub aoa_records: usize,
    pub matches_found: usize,
    pub rows_emitted: usize,
}

/// Batch correlator over the serial and positioning logs
pub struct Correlator {
    config: Config,
}

impl Correlator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pass and write the output CSV.
    pub fn run(&self) -> anyhow::Result<RunReport> {
        let results = load_position_fixes(self.config.results_path())?;
        info!(
            fixes = results.fixes.len(),
            lines = results.lines_read,
            skipped = results.lines_skipped,
            overwritten = results.duplicates_overwritten,
            "results_loaded"
        );

        let serial = load_serial(self.config.serial_path(), &results.fixes)?;
        info!(
            imu = serial.imu.len(),
            aoa = serial.aoa.len(),
            matches = serial.matches.len(),
            lines = serial.lines_read,
            skipped = serial.lines_skipped,
            "serial_loaded"
        );

        let mut sink = CsvSink::create(self.config.output_path())?;
        for m in &serial.matches {
            // present by construction: matches are only collected for
            // frame numbers already in the fix map
            let Some(fix) = results.fixes.get(&m.frame_number).copied() else {
                continue;
            };

            let row = self.assemble_row(m, fix, &serial);
            debug!(
                seq = m.sequence_index,
                fr_no = m.frame_number,
                ang = row.ang_contr,
                snapped = snap_to_grid(row.ang_contr, self.config.angle_grid_step()),
                "row_assembled"
            );
            sink.write_row(&row)?;
        }

        let rows_emitted = sink.finish()?;
        info!(rows = rows_emitted, "correlation_complete");

        Ok(RunReport {
            fixes_loaded: results.fixes.len(),
            imu_records: serial.imu.len(),
            aoa_records: serial.aoa.len(),
            matches_found: serial.matches.len(),
            rows_emitted,
        })
    }

    /// Derive one output row from a match and its nearest IMU/AoA records.
    fn assemble_row(&self, m: &Match, fix: PositionFix, serial: &SerialLoad) -> OutputRow {
        let (g_x, g_y, g_z) = serial
            .imu
            .nearest(m.sequence_index)
            .map_or((0.0, 0.0, 0.0), |imu| g_triplet(&imu.payload));

        let pdoa = serial
            .aoa
            .nearest(m.sequence_index)
            .and_then(|aoa| aoa.pdoa)
            .unwrap_or(0.0);

        let ang_contr = bearing_angle(fix.x, fix.y, self.config.origin());

        OutputRow { x: fix.x, y: fix.y, ang_contr, pdoa, g_x, g_y, g_z }
    }
}
