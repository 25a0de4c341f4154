//! Shared types for the RTLS log correlator

use serde::Deserialize;

/// One line of the positioning-system log.
///
/// Only `seconds` is required for the line to count as a fix; missing
/// coordinates fall back to 0.0 when the row is emitted.
#[derive(Debug, Deserialize)]
pub struct ResultsLine {
    /// Capture second - can arrive as integer or float, truncated to i64
    #[serde(default)]
    pub seconds: Option<f64>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

/// One line of the serial device log, before classification.
///
/// The firmware interleaves IMU samples, AoA measurements and frame
/// markers on the same UART, so every line is parsed into the union of
/// all fields and classified afterwards.
#[derive(Debug, Deserialize)]
pub struct SerialLine {
    /// Raw IMU payload (hex string)
    #[serde(default)]
    pub data: Option<String>,
    /// AoA measurement marker - only its presence matters
    #[serde(default, rename = "angleOfArrival")]
    pub angle_of_arrival: Option<serde_json::Value>,
    /// Phase difference of arrival, reported alongside angleOfArrival
    #[serde(default)]
    pub pdoa: Option<f64>,
    /// Frame number marker
    #[serde(default)]
    pub fr_no: Option<f64>,
}

/// IMU sample carrying the raw hex payload
#[derive(Debug, Clone, PartialEq)]
pub struct ImuSample {
    pub payload: String,
}

/// AoA measurement; pdoa may be absent or null on corrupt lines
#[derive(Debug, Clone, PartialEq)]
pub struct AoaSample {
    pub pdoa: Option<f64>,
}

/// A serial line classified into exactly one record kind
#[derive(Debug, Clone, PartialEq)]
pub enum SerialRecord {
    Imu(ImuSample),
    Aoa(AoaSample),
    /// Frame marker carrying the frame number
    Frame(i64),
    /// Parsed fine but carries none of the known keys
    Other,
}

impl SerialLine {
    /// Classify by the first matching key: `data`, then `angleOfArrival`,
    /// then `fr_no`. A line carrying several keys is classified once.
    pub fn classify(self) -> SerialRecord {
        if let Some(payload) = self.data {
            SerialRecord::Imu(ImuSample { payload })
        } else if self.angle_of_arrival.is_some() {
            SerialRecord::Aoa(AoaSample { pdoa: self.pdoa })
        } else if let Some(fr_no) = self.fr_no {
            SerialRecord::Frame(fr_no as i64)
        } else {
            SerialRecord::Other
        }
    }
}

impl SerialRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            SerialRecord::Imu(_) => "imu",
            SerialRecord::Aoa(_) => "aoa",
            SerialRecord::Frame(_) => "frame",
            SerialRecord::Other => "other",
        }
    }
}

/// Position fix as retained in the per-second map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub x: f64,
    pub y: f64,
}

/// A frame marker whose frame number has a position fix.
///
/// `sequence_index` is the 0-based line number in the serial log, the
/// shared timeline used to align the three streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub sequence_index: usize,
    pub frame_number: i64,
}

/// One assembled output row, pre-rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRow {
    pub x: f64,
    pub y: f64,
    pub ang_contr: f64,
    pub pdoa: f64,
    pub g_x: f64,
    pub g_y: f64,
    pub g_z: f64,
}
