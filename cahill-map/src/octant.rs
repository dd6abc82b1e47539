//! Conformal projection of one octant onto an equilateral triangle.
//!
//! The octant is the spherical triangle bounded by the equator and the
//! meridians at ±45° around its central meridian (0° here). It maps onto an
//! upright triangle with unit side: the pole at (0, 0), the equator along
//! `y = √3/2`, and the two equator vertices at (±1/2, √3/2). The y axis points
//! toward the equator, matching SVG/canvas orientation.
//!
//! Each half of the triangle is split again along the line where a point is
//! equally close (in latitude terms) to the pole and to the nearer equator
//! vertex. Points nearer the pole are projected from the pole; the rest are
//! projected from the vertex pole and turned 60° into place, so both
//! singular corners get the same treatment.

use cahill_core::constants::{HALF_ROOT_3, PI_OVER_6, QUARTER_PI};
use cahill_core::{LatLon, Point, Pole, Radians};
use num_complex::Complex64;

/// Scale that gives the hexagon of six projected octants a unit circumradius:
/// 2^(2/3)/6 ∫₀^π sin^(-1/3)(x) dx.
pub const HEXAGON_SCALE: f64 = 1.1129126745;

/// Pole on the equator at the octant's east vertex, oriented so that its
/// frame lines up with the octant's central pole frame after a 60° turn.
pub const VERTEX_POLE: Pole = Pole::new(LatLon::new(0.0, QUARTER_PI), -3.0 * QUARTER_PI);

/// Polynomial approximation of the conformal map from the 120° wedge onto the
/// triangle: `w = z + z⁷/21 + z¹¹/99 + 16·z¹³/1287`, evaluated in a frame
/// turned by -π/6 and normalized by [`HEXAGON_SCALE`].
///
/// The truncation is part of the projection's definition; adding terms
/// would move every projected point.
pub fn conformal_correction(z: Complex64) -> Complex64 {
    let z = z * Complex64::from_polar(1.0, -PI_OVER_6);
    let w = z + z.powi(7) / 21.0 + z.powi(11) / 99.0 + z.powi(13) / (1287.0 / 16.0);
    w / Complex64::from_polar(HEXAGON_SCALE, -PI_OVER_6)
}

/// Projects a point of the reference octant (central meridian 0°, radians)
/// onto the unit triangle.
pub fn project_octant(coord: LatLon<Radians>) -> Point {
    let negate = if coord.lon < 0.0 { -1.0 } else { 1.0 };
    let coord = LatLon::<Radians>::new(coord.lat, negate * coord.lon);

    let oblique = VERTEX_POLE.oblique(coord);
    let from_north_pole = coord.lat > oblique.lat;
    let selected = if from_north_pole { coord } else { oblique };

    // Stereographic radius with the 3:2 angle compression of a 120° wedge.
    let radius = libm::pow(libm::tan(QUARTER_PI - selected.lat / 2.0), 2.0 / 3.0);
    let w = Complex64::from_polar(radius, selected.lon * 2.0 / 3.0);
    let z = conformal_correction(w);

    if from_north_pole {
        Point::new(negate * z.im, z.re)
    } else {
        Point::new(
            negate * (-HALF_ROOT_3 * z.re - z.im / 2.0 + 0.5),
            -z.re / 2.0 + HALF_ROOT_3 * z.im + HALF_ROOT_3,
        )
    }
}
