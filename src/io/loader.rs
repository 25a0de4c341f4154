//! JSONL log readers
//!
//! Both input logs are line-delimited JSON. A missing file is fatal;
//! an unparsable line is skipped and counted, never fatal. Both logs
//! are fully buffered into memory structures before correlation runs.

use crate::domain::types::{
    AoaSample, ImuSample, Match, PositionFix, ResultsLine, SerialLine, SerialRecord,
};
use crate::services::StreamIndex;
use anyhow::Context;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::trace;

/// Position-fix log loaded into the per-second map
#[derive(Debug, Default)]
pub struct ResultsLoad {
    /// Fix per capture second; later lines overwrite earlier ones
    pub fixes: FxHashMap<i64, PositionFix>,
    pub lines_read: usize,
    pub lines_skipped: usize,
    /// Fixes discarded by the last-write-wins policy
    pub duplicates_overwritten: usize,
}

/// Serial log split into its three indexed streams
#[derive(Debug, Default)]
pub struct SerialLoad {
    pub imu: StreamIndex<ImuSample>,
    pub aoa: StreamIndex<AoaSample>,
    /// Frame markers with a position fix, in serial-log line order
    pub matches: Vec<Match>,
    pub lines_read: usize,
    pub lines_skipped: usize,
}

/// Read the positioning-system log into a map keyed by integer second.
///
/// Lines without a `seconds` field are ignored; a repeated second
/// overwrites the earlier fix (the capture scripts emit several fixes
/// per second and only the last one is meaningful).
pub fn load_position_fixes(path: &str) -> anyhow::Result<ResultsLoad> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open positioning log {}", path))?;
    let reader = BufReader::new(file);

    let mut load = ResultsLoad::default();
    for line in reader.lines() {
        let line = line.with_context(|| format!("Failed to read positioning log {}", path))?;
        load.lines_read += 1;

        let Ok(parsed) = serde_json::from_str::<ResultsLine>(&line) else {
            load.lines_skipped += 1;
            continue;
        };
        let Some(seconds) = parsed.seconds else {
            continue;
        };

        let fix =
            PositionFix { x: parsed.x.unwrap_or(0.0), y: parsed.y.unwrap_or(0.0) };
        if load.fixes.insert(seconds as i64, fix).is_some() {
            load.duplicates_overwritten += 1;
        }
    }

    Ok(load)
}

/// Read the serial log, indexing IMU and AoA records by physical line
/// number and collecting a `Match` for every frame marker whose frame
/// number is present in `fixes`.
///
/// The line number counts every physical line, including skipped ones,
/// so sequence indices stay comparable across runs of dirty data.
pub fn load_serial(
    path: &str,
    fixes: &FxHashMap<i64, PositionFix>,
) -> anyhow::Result<SerialLoad> {
    let file =
        File::open(path).with_context(|| format!("Failed to open serial log {}", path))?;
    let reader = BufReader::new(file);

    let mut load = SerialLoad::default();
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read serial log {}", path))?;
        load.lines_read += 1;

        let Ok(parsed) = serde_json::from_str::<SerialLine>(&line) else {
            load.lines_skipped += 1;
            continue;
        };

        let record = parsed.classify();
        trace!(line = line_idx, kind = record.kind(), "serial_line_classified");
        match record {
            SerialRecord::Imu(sample) => load.imu.push(line_idx, sample),
            SerialRecord::Aoa(sample) => load.aoa.push(line_idx, sample),
            SerialRecord::Frame(frame_number) => {
                if fixes.contains_key(&frame_number) {
                    load.matches.push(Match { sequence_index: line_idx, frame_number });
                }
            }
            SerialRecord::Other => {}
        }
    }

    Ok(load)
}
