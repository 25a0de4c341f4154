//! IMU payload decoding
//!
//! The IMU reports accelerometer axes as 4-hex-digit big-endian words
//! inside the serial payload string. Words are two's-complement with a
//! ±2 g full-scale range. Corrupt payloads never abort a run: decoders
//! return `None`/defaults so the caller can degrade the row to zeros.

/// Full-scale reading in g for the signed 16-bit range
const FULL_SCALE_G: f64 = 2.0;

/// Byte offsets of the (x, y, z) words within the payload string
const AXIS_OFFSETS: [usize; 3] = [4, 8, 12];

/// Parse a 4-hex-digit word as a two's-complement signed 16-bit value.
///
/// Returns `None` on malformed input (wrong length or non-hex digits).
pub fn signed16(hex4: &str) -> Option<i16> {
    let bytes = hex::decode(hex4).ok()?;
    let word: [u8; 2] = bytes.try_into().ok()?;
    Some(i16::from_be_bytes(word))
}

/// Decode one accelerometer word into g.
///
/// Malformed input decodes as 0 g, the tolerance policy for corrupt
/// log lines.
pub fn g_force(hex4: &str) -> f64 {
    f64::from(signed16(hex4).unwrap_or(0)) / 32768.0 * FULL_SCALE_G
}

/// Decode the (x, y, z) accelerometer triplet from an IMU payload.
///
/// The words sit at byte offsets 4-8, 8-12 and 12-16; payloads shorter
/// than 16 characters yield all zeros.
pub fn g_triplet(payload: &str) -> (f64, f64, f64) {
    if payload.len() < 16 {
        return (0.0, 0.0, 0.0);
    }
    // get() instead of slicing: a word straddling a non-ASCII byte
    // decodes as 0 g rather than panicking
    let [x, y, z] =
        AXIS_OFFSETS.map(|off| payload.get(off..off + 4).map_or(0.0, g_force));
    (x, y, z)
}
