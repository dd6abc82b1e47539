//! Geometry primitives for the Cahill-Concialdi octahedral world map.
//!
//! `cahill-core` holds the small value types and spherical math that the
//! projection crate builds on: planar points, unit-tagged latitude/longitude
//! pairs, and the oblique transform that re-expresses a coordinate relative to
//! an arbitrary pole.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`point`] | [`Point`]: planar coordinates, rotate/translate/scale, angle and distance |
//! | [`latlon`] | [`LatLon`] tagged with [`Degrees`] or [`Radians`], validation, great-circle distance |
//! | [`pole`] | [`Pole`] and the oblique transform ([`Pole::oblique`]) |
//! | [`utils`] | Angle wrapping helpers |
//! | [`constants`] | π fractions, √3/2, degree/radian factors |
//! | [`errors`] | [`CoordError`] and [`CoordResult`] |
//!
//! # Design Notes
//!
//! - **Values, not mutation**: every transform on [`Point`] returns a new
//!   point, so a placement reads as `p.rotate(a).translate(o).scale(s)`.
//! - **Units in the type**: `LatLon<Degrees>` and `LatLon<Radians>` do not
//!   convert implicitly. Latitude always comes first.
//! - **No shared state**: everything here is `Copy` and `Send + Sync`.

pub mod constants;
pub mod errors;
pub mod latlon;
pub mod point;
pub mod pole;
pub mod test_helpers;
pub mod utils;

pub use errors::{CoordError, CoordResult};
pub use latlon::{AngleUnit, Degrees, LatLon, Radians};
pub use point::Point;
pub use pole::{oblique_coordinate, Pole, NORTH_POLE};
