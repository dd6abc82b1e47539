//! Spherical coordinate pairs tagged with their angular unit.
//!
//! Callers of the projection pass degrees at some call sites and radians at
//! others. [`LatLon`] carries the unit as a type parameter so the two can not
//! be mixed up; conversion is always explicit:
//!
//! ```
//! use cahill_core::{LatLon, Degrees, Radians};
//!
//! let deg: LatLon<Degrees> = LatLon::new(45.0, -90.0);
//! let rad: LatLon<Radians> = deg.to_radians();
//! assert!((rad.lat - std::f64::consts::FRAC_PI_4).abs() < 1e-15);
//! ```
//!
//! Order is always latitude first, longitude second. Longitude is not
//! wrapped on construction: tiles that straddle the antimeridian work with
//! values past ±180° on purpose.

use std::fmt;
use std::marker::PhantomData;

use crate::constants::{DEG_TO_RAD, HALF_PI, MAX_LATITUDE_DEG, RAD_TO_DEG};
use crate::errors::{CoordError, CoordResult};

/// Unit marker for [`LatLon`].
pub trait AngleUnit: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// A quarter turn in this unit, the latitude bound.
    const QUARTER_TURN: f64;
    const SUFFIX: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Radians;

impl AngleUnit for Degrees {
    const QUARTER_TURN: f64 = MAX_LATITUDE_DEG;
    const SUFFIX: &'static str = "°";
}

impl AngleUnit for Radians {
    const QUARTER_TURN: f64 = HALF_PI;
    const SUFFIX: &'static str = " rad";
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct LatLon<U: AngleUnit = Degrees> {
    pub lat: f64,
    pub lon: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    unit: PhantomData<U>,
}

impl<U: AngleUnit> LatLon<U> {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            unit: PhantomData,
        }
    }

    /// Checks that both components are finite and the latitude is on the
    /// sphere. Longitude is deliberately unbounded.
    pub fn validate(&self) -> CoordResult<Self> {
        if !self.lat.is_finite() {
            return Err(CoordError::not_finite("latitude"));
        }
        if !self.lon.is_finite() {
            return Err(CoordError::not_finite("longitude"));
        }
        if self.lat.abs() > U::QUARTER_TURN {
            return Err(CoordError::out_of_range(
                "latitude",
                self.lat,
                -U::QUARTER_TURN,
                U::QUARTER_TURN,
            ));
        }
        Ok(*self)
    }

    #[inline]
    pub fn is_north(&self) -> bool {
        self.lat > 0.0
    }
}

impl LatLon<Degrees> {
    #[inline]
    pub fn to_radians(self) -> LatLon<Radians> {
        LatLon::new(self.lat * DEG_TO_RAD, self.lon * DEG_TO_RAD)
    }
}

impl LatLon<Radians> {
    #[inline]
    pub fn to_degrees(self) -> LatLon<Degrees> {
        LatLon::new(self.lat * RAD_TO_DEG, self.lon * RAD_TO_DEG)
    }

    /// Great-circle angular distance in radians.
    ///
    /// The cosine of the separation is clamped into [-1, 1] so that nearly
    /// coincident or antipodal points yield 0 or π instead of NaN.
    pub fn distance_to(&self, other: LatLon<Radians>) -> f64 {
        let cos_delta_lon = libm::cos(self.lon - other.lon);
        let cos_distance = libm::sin(self.lat) * libm::sin(other.lat)
            + libm::cos(self.lat) * libm::cos(other.lat) * cos_delta_lon;
        HALF_PI - libm::asin(cos_distance.clamp(-1.0, 1.0))
    }
}

impl<U: AngleUnit> fmt::Display for LatLon<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}{}, {}{})",
            self.lat,
            U::SUFFIX,
            self.lon,
            U::SUFFIX
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PI;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_degree_radian_round_trip() {
        let deg: LatLon<Degrees> = LatLon::new(-33.5, 151.25);
        let back = deg.to_radians().to_degrees();
        assert_abs_diff_eq!(back.lat, deg.lat, epsilon = 1e-12);
        assert_abs_diff_eq!(back.lon, deg.lon, epsilon = 1e-12);
    }

    #[test]
    fn test_validate_accepts_poles_and_wide_longitude() {
        assert!(LatLon::<Degrees>::new(90.0, 0.0).validate().is_ok());
        assert!(LatLon::<Degrees>::new(-90.0, 0.0).validate().is_ok());
        assert!(LatLon::<Degrees>::new(10.0, 191.5).validate().is_ok());
        assert!(LatLon::<Radians>::new(HALF_PI, -PI).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_latitude() {
        let err = LatLon::<Degrees>::new(90.5, 0.0).validate().unwrap_err();
        assert!(matches!(err, CoordError::OutOfRange { .. }));
        assert!(LatLon::<Radians>::new(1.6, 0.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert_eq!(
            LatLon::<Degrees>::new(f64::NAN, 0.0).validate(),
            Err(CoordError::not_finite("latitude"))
        );
        assert_eq!(
            LatLon::<Degrees>::new(0.0, f64::INFINITY).validate(),
            Err(CoordError::not_finite("longitude"))
        );
    }

    #[test]
    fn test_distance_quarter_turn() {
        let equator = LatLon::<Radians>::new(0.0, 0.0);
        let pole = LatLon::<Radians>::new(HALF_PI, 1.234);
        assert_abs_diff_eq!(equator.distance_to(pole), HALF_PI, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_coincident_and_antipodal() {
        let p = LatLon::<Radians>::new(0.3, 0.7);
        assert_abs_diff_eq!(p.distance_to(p), 0.0, epsilon = 1e-7);
        let antipode = LatLon::<Radians>::new(-0.3, 0.7 - PI);
        let d = p.distance_to(antipode);
        assert!(!d.is_nan());
        assert_abs_diff_eq!(d, PI, epsilon = 1e-7);
    }

    #[test]
    fn test_display_includes_unit() {
        assert_eq!(LatLon::<Degrees>::new(1.5, -2.0).to_string(), "(1.5°, -2°)");
        assert_eq!(LatLon::<Radians>::new(0.5, 0.0).to_string(), "(0.5 rad, 0 rad)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let original = LatLon::<Degrees>::new(-33.5, 151.25);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#"{"lat":-33.5,"lon":151.25}"#);
        let deserialized: LatLon<Degrees> = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, original);
    }
}
