//! Bearing geometry relative to the antenna origin
//!
//! The radar display convention differs from the mathematical one:
//! 0° points along +Y ("forward" from the antenna), +90° along +X
//! ("right"), -90° along -X ("left"). Angles are normalized into
//! (-180, 180].

/// Fixed reference point of the antenna array, in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Default for Origin {
    fn default() -> Self {
        // antenna mast position on the test floor
        Self { x: 3.6, y: 0.0 }
    }
}

/// Bearing of (x, y) as seen from `origin`, in degrees.
///
/// Computed as `90 - atan2(dy, dx)` and normalized into (-180, 180].
pub fn bearing_angle(x: f64, y: f64, origin: Origin) -> f64 {
    let dx = x - origin.x;
    let dy = y - origin.y;

    let math_angle = dy.atan2(dx).to_degrees();
    let angle = 90.0 - math_angle;

    if angle > 180.0 {
        angle - 360.0
    } else if angle <= -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Snap a bearing to the nearest multiple of `step_deg`, clamped to the
/// radar display's [-90, 90] sector.
pub fn snap_to_grid(angle_deg: f64, step_deg: f64) -> f64 {
    let snapped = (angle_deg / step_deg).round() * step_deg;
    snapped.clamp(-90.0, 90.0)
}
