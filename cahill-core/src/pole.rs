//! Oblique spherical transform.
//!
//! A [`Pole`] is a point on the sphere plus an orientation angle θ. Seen from
//! that pole, every other point has a latitude (π/2 minus its great-circle
//! distance to the pole) and a longitude (its bearing from the pole, turned
//! by θ). [`Pole::oblique`] computes that re-expressed coordinate.
//!
//! ```
//! use cahill_core::{LatLon, Pole, Radians};
//! use cahill_core::constants::{HALF_PI, QUARTER_PI};
//!
//! // A pole on the equator: the geographic north pole sits on its equator.
//! let pole = Pole::new(LatLon::new(0.0, QUARTER_PI), -3.0 * QUARTER_PI);
//! let seen = pole.oblique(LatLon::<Radians>::new(HALF_PI, 0.0));
//! assert!(seen.lat.abs() < 1e-12);
//! ```

use crate::constants::{HALF_PI, PI};
use crate::latlon::{LatLon, Radians};
use crate::utils::wrap_pm_pi;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pole {
    position: LatLon<Radians>,
    theta: f64,
}

/// The geographic north pole with no extra rotation.
pub const NORTH_POLE: Pole = Pole::new(LatLon::new(HALF_PI, 0.0), 0.0);

impl Pole {
    #[inline]
    pub const fn new(position: LatLon<Radians>, theta: f64) -> Self {
        Self { position, theta }
    }

    #[inline]
    pub fn position(&self) -> LatLon<Radians> {
        self.position
    }

    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Exact comparison against [`NORTH_POLE`], no tolerance.
    #[inline]
    pub fn is_north_pole(&self) -> bool {
        *self == NORTH_POLE
    }

    /// Returns `coord` as seen from this pole's frame, longitude in [-π, π].
    pub fn oblique(&self, coord: LatLon<Radians>) -> LatLon<Radians> {
        if self.is_north_pole() {
            return coord;
        }

        let pole_lat = self.position.lat;
        let delta_lon = self.position.lon - coord.lon;
        let cos_delta_lon = libm::cos(delta_lon);
        let on_axis = pole_lat == HALF_PI;

        let lat = if on_axis {
            coord.lat
        } else {
            HALF_PI - self.position.distance_to(coord)
        };

        let bearing = if on_axis {
            delta_lon
        } else {
            let ratio = (libm::cos(pole_lat) * libm::sin(coord.lat)
                - libm::sin(pole_lat) * libm::cos(coord.lat) * cos_delta_lon)
                / libm::cos(lat);
            libm::acos(ratio) - PI
        };

        // acos is NaN when the point sits on the pole's own axis (cos(lat) = 0)
        // or rounding pushes the ratio past ±1. The bearing is then decided by
        // which side of the pole the point lies on.
        let lon = if bearing.is_nan() {
            let toward_pole = (cos_delta_lon >= 0.0 && coord.lat < pole_lat)
                || (cos_delta_lon < 0.0 && coord.lat < -pole_lat);
            if toward_pole {
                0.0
            } else {
                -PI
            }
        } else if libm::sin(-delta_lon) > 0.0 {
            -bearing
        } else {
            bearing
        };

        LatLon::new(lat, wrap_pm_pi(lon - self.theta))
    }
}

/// Free-function form of [`Pole::oblique`].
#[inline]
pub fn oblique_coordinate(coord: LatLon<Radians>, pole: &Pole) -> LatLon<Radians> {
    pole.oblique(coord)
}
