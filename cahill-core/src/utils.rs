//! Angle wrapping helpers.
//!
//! | Function | Input | Output Range |
//! |----------|-------|--------------|
//! | [`wrap_pm_pi`] | radians | [-π, π] |
//! | [`to_positive_degrees`] | degrees in [-360°, 360°) | [0°, 360°) |
//!
//! [`wrap_pm_pi`] steps by whole turns instead of taking a remainder, so a
//! value that is already inside the range is returned bit-for-bit unchanged
//! and values several turns out are still brought back.

use crate::constants::{DEGREES_IN_CIRCLE, PI, TWOPI};

/// Wraps an angle in radians into [-π, π] by repeated ±2π steps.
///
/// Exactly ±π are left alone. Non-finite input is returned as is.
///
/// ```
/// use cahill_core::utils::wrap_pm_pi;
/// use std::f64::consts::PI;
///
/// assert!((wrap_pm_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
/// assert!((wrap_pm_pi(-7.0 * PI) + PI).abs() < 1e-12);
/// assert_eq!(wrap_pm_pi(1.0), 1.0);
/// ```
#[inline]
pub fn wrap_pm_pi(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let mut wrapped = angle;
    while wrapped > PI {
        wrapped -= TWOPI;
    }
    while wrapped < -PI {
        wrapped += TWOPI;
    }
    wrapped
}

/// Shifts a negative longitude in degrees up by one turn.
///
/// Used when subtracting longitudes across the antimeridian, where both
/// operands have to live in [0°, 360°).
#[inline]
pub fn to_positive_degrees(lon: f64) -> f64 {
    if lon < 0.0 {
        lon + DEGREES_IN_CIRCLE
    } else {
        lon
    }
}
