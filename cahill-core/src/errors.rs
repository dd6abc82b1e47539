//! Error types for coordinate validation.
//!
//! [`CoordError`] covers the ways a spherical or planar input can be rejected
//! before any projection math runs: a value outside its valid domain or a NaN
//! or infinite component.
//!
//! | Variant | Use Case |
//! |---------|----------|
//! | [`OutOfRange`](CoordError::OutOfRange) | Latitude beyond ±90° |
//! | [`NotFinite`](CoordError::NotFinite) | NaN or infinite component |
//!
//! ```
//! use cahill_core::{CoordError, CoordResult};
//!
//! fn check_lat(lat: f64) -> CoordResult<f64> {
//!     if !(-90.0..=90.0).contains(&lat) {
//!         return Err(CoordError::out_of_range("latitude", lat, -90.0, 90.0));
//!     }
//!     Ok(lat)
//! }
//!
//! assert!(check_lat(91.0).is_err());
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordError {
    #[error("{what} {value} outside valid range [{min}, {max}]")]
    OutOfRange {
        what: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{what} is not finite")]
    NotFinite { what: String },
}

/// Convenience alias for `Result<T, CoordError>`.
pub type CoordResult<T> = Result<T, CoordError>;

impl CoordError {
    pub fn out_of_range(what: &str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            what: what.to_string(),
            value,
            min,
            max,
        }
    }

    pub fn not_finite(what: &str) -> Self {
        Self::NotFinite {
            what: what.to_string(),
        }
    }
}
