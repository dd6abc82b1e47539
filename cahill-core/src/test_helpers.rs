//! Assertions shared by the unit and integration tests of the workspace.
//!
//! Floating-point results are compared either in units in the last place
//! ([`assert_ulp_lt!`](crate::assert_ulp_lt)) when the computation is expected
//! to be reproducible almost bit-for-bit, or with an absolute tolerance for
//! planar points and spherical coordinates.

use crate::latlon::{AngleUnit, LatLon};
use crate::point::Point;

/// Maps an `f64` onto a `u64` whose ordering matches the float ordering, so
/// that adjacent floats differ by exactly one.
#[inline]
pub fn ordered_bits(x: f64) -> u64 {
    let bits = x.to_bits();
    if bits >> 63 == 1 {
        !bits
    } else {
        bits | (1 << 63)
    }
}

#[inline]
pub fn ulp_distance(a: f64, b: f64) -> u64 {
    ordered_bits(a).abs_diff(ordered_bits(b))
}

#[track_caller]
pub fn assert_ulp_le(a: f64, b: f64, max_ulp: u64, ctx: &str) {
    // +0.0 and -0.0 are equal but sit 1 apart in ordered space.
    if a == b {
        return;
    }
    assert!(
        a.is_finite() && b.is_finite(),
        "{}: non-finite value, a={} b={}",
        ctx,
        a,
        b
    );
    let d = ulp_distance(a, b);
    assert!(
        d <= max_ulp,
        "{}: ULP={} exceeds {}, a={} (0x{:016x}) b={} (0x{:016x})",
        ctx,
        d,
        max_ulp,
        a,
        a.to_bits(),
        b,
        b.to_bits()
    );
}

#[track_caller]
pub fn assert_point_near(actual: Point, expected: Point, tolerance: f64) {
    assert!(
        actual.distance_to(expected) <= tolerance,
        "point {:?} not within {} of {:?}",
        actual,
        tolerance,
        expected
    );
}

#[track_caller]
pub fn assert_latlon_near<U: AngleUnit>(actual: LatLon<U>, expected: LatLon<U>, tolerance: f64) {
    assert!(
        (actual.lat - expected.lat).abs() <= tolerance
            && (actual.lon - expected.lon).abs() <= tolerance,
        "coordinate {} not within {} of {}",
        actual,
        tolerance,
        expected
    );
}

#[macro_export]
macro_rules! assert_ulp_lt {
    ($a:expr, $b:expr, $max_ulp:expr) => {
        $crate::test_helpers::assert_ulp_le(
            $a,
            $b,
            $max_ulp,
            &format!(
                "ULP check failed: {} vs {} (max_ulp={})",
                stringify!($a),
                stringify!($b),
                $max_ulp
            ),
        )
    };
    ($a:expr, $b:expr, $max_ulp:expr, $($arg:tt)*) => {
        $crate::test_helpers::assert_ulp_le($a, $b, $max_ulp, &format!($($arg)*))
    };
}
