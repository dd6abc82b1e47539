use thiserror::Error;

pub type MapResult<T> = Result<T, MapError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    #[error("No map area contains ({lat}°, {lon}°)")]
    NoContainingArea { lat: f64, lon: f64 },

    #[error("Map area index {index} out of range (have {count})")]
    AreaIndexOutOfRange { index: usize, count: usize },

    #[error("No inverse solution inside cell at ({lat}°, {lon}°): {message}")]
    NoRootInCell { lat: f64, lon: f64, message: String },

    #[error("Singularity in transformation: {message}")]
    Singularity { message: String },

    #[error("Invalid cell: {message}")]
    InvalidCell { message: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Coordinate error: {source}")]
    CoordinateError {
        #[from]
        source: cahill_core::CoordError,
    },
}

impl MapError {
    pub fn no_containing_area(lat: f64, lon: f64) -> Self {
        Self::NoContainingArea { lat, lon }
    }

    pub fn area_index_out_of_range(index: usize, count: usize) -> Self {
        Self::AreaIndexOutOfRange { index, count }
    }

    pub fn no_root_in_cell(lat: f64, lon: f64, message: impl Into<String>) -> Self {
        Self::NoRootInCell {
            lat,
            lon,
            message: message.into(),
        }
    }

    pub fn singularity(message: impl Into<String>) -> Self {
        Self::Singularity {
            message: message.into(),
        }
    }

    pub fn invalid_cell(message: impl Into<String>) -> Self {
        Self::InvalidCell {
            message: message.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
