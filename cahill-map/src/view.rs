//! Placement of the projected map on a raster canvas.
//!
//! Projected points come out of [`crate::area::project`] in map units, with
//! the north pole at the origin and one octant [`OCTANT_SCALE`] units wide.
//! A [`MapView`] tilts the map, shifts it so the whole butterfly lies in a
//! `view_width × view_height` window, and scales that window to the canvas
//! width in pixels.
//!
//! ```
//! use cahill_map::view::MapViewBuilder;
//!
//! let view = MapViewBuilder::new().canvas_width(604).build().unwrap();
//! assert_eq!(view.canvas_size(), (604, 356));
//! ```
//!
//! [`OCTANT_SCALE`]: crate::area::OCTANT_SCALE

use cahill_core::constants::DEG_TO_RAD;
use cahill_core::{Degrees, LatLon, Point};

use crate::area::project;
use crate::error::{MapError, MapResult};

pub const DEFAULT_TILT_DEG: f64 = -5.4;
pub const DEFAULT_VIEW_ORIGIN: Point = Point::new(142.0, 45.5);
pub const DEFAULT_VIEW_WIDTH: f64 = 302.0;
pub const DEFAULT_VIEW_HEIGHT: f64 = 178.0;
pub const DEFAULT_PIXEL_DENSITY: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapView {
    tilt_deg: f64,
    origin: Point,
    view_width: f64,
    view_height: f64,
    canvas_width: u32,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            tilt_deg: DEFAULT_TILT_DEG,
            origin: DEFAULT_VIEW_ORIGIN,
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
            canvas_width: DEFAULT_VIEW_WIDTH as u32 * DEFAULT_PIXEL_DENSITY,
        }
    }
}

impl MapView {
    pub fn builder() -> MapViewBuilder {
        MapViewBuilder::new()
    }

    #[inline]
    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    #[inline]
    pub fn tilt(&self) -> f64 {
        self.tilt_deg * DEG_TO_RAD
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    #[inline]
    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    #[inline]
    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    /// Canvas pixels per map unit.
    #[inline]
    pub fn scale_factor(&self) -> f64 {
        f64::from(self.canvas_width) / self.view_width
    }

    /// `(width, height)` of the canvas in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        let height = (self.scale_factor() * self.view_height).round() as u32;
        (self.canvas_width, height)
    }

    /// Maps a projected point into canvas pixels: tilt, shift, then scale.
    #[inline]
    pub fn to_canvas(&self, point: Point) -> Point {
        point
            .rotate(self.tilt())
            .translate(self.origin)
            .scale(self.scale_factor())
    }

    /// Inverse of [`to_canvas`](Self::to_canvas).
    pub fn canvas_to_map(&self, pixel: Point) -> Point {
        pixel
            .scale(1.0 / self.scale_factor())
            .translate(-self.origin)
            .rotate(-self.tilt())
    }

    /// Forward projection straight into canvas pixels.
    pub fn project(&self, coord: LatLon<Degrees>, area: Option<usize>) -> MapResult<Point> {
        Ok(self.to_canvas(project(coord, area)?))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapViewBuilder {
    tilt_deg: Option<f64>,
    origin: Option<Point>,
    view_size: Option<(f64, f64)>,
    canvas_width: Option<u32>,
    pixel_density: Option<u32>,
}

impl MapViewBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tilt_deg(mut self, tilt_deg: f64) -> Self {
        self.tilt_deg = Some(tilt_deg);
        self
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Some(Point::new(x, y));
        self
    }

    pub fn view_size(mut self, width: f64, height: f64) -> Self {
        self.view_size = Some((width, height));
        self
    }

    pub fn canvas_width(mut self, width: u32) -> Self {
        self.canvas_width = Some(width);
        self
    }

    /// Canvas width as a multiple of the view width, resolved at
    /// [`build`](Self::build) time. Excludes [`canvas_width`](Self::canvas_width).
    pub fn pixel_density(mut self, density: u32) -> Self {
        self.pixel_density = Some(density);
        self
    }

    pub fn validate(&self) -> MapResult<()> {
        if let Some(tilt) = self.tilt_deg {
            if !tilt.is_finite() {
                return Err(MapError::invalid_parameter("tilt must be finite"));
            }
        }
        if let Some(origin) = self.origin {
            if !origin.is_finite() {
                return Err(MapError::invalid_parameter("view origin must be finite"));
            }
        }
        if let Some((width, height)) = self.view_size {
            if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
                return Err(MapError::invalid_parameter(format!(
                    "view size must be positive, got {} x {}",
                    width, height
                )));
            }
        }
        if self.canvas_width == Some(0) {
            return Err(MapError::invalid_parameter("canvas width must be non-zero"));
        }
        if self.pixel_density == Some(0) {
            return Err(MapError::invalid_parameter("pixel density must be non-zero"));
        }
        if self.canvas_width.is_some() && self.pixel_density.is_some() {
            return Err(MapError::invalid_parameter(
                "set either canvas width or pixel density, not both",
            ));
        }
        Ok(())
    }

    pub fn build(self) -> MapResult<MapView> {
        self.validate()?;

        let defaults = MapView::default();
        let (view_width, view_height) = self
            .view_size
            .unwrap_or((defaults.view_width, defaults.view_height));

        let canvas_width = match (self.canvas_width, self.pixel_density) {
            (Some(width), _) => width,
            (None, Some(density)) => (view_width * f64::from(density)).round() as u32,
            (None, None) => defaults.canvas_width,
        };
        if canvas_width == 0 {
            return Err(MapError::invalid_parameter(format!(
                "view width {} gives an empty canvas",
                view_width
            )));
        }

        Ok(MapView {
            tilt_deg: self.tilt_deg.unwrap_or(defaults.tilt_deg),
            origin: self.origin.unwrap_or(defaults.origin),
            view_width,
            view_height,
            canvas_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cahill_core::test_helpers::assert_point_near;

    #[test]
    fn test_default_view() {
        let view = MapView::default();
        assert_eq!(view.canvas_width(), 906);
        assert_eq!(view.scale_factor(), 3.0);
        assert_eq!(view.canvas_size(), (906, 534));
        assert_eq!(view.tilt_deg(), -5.4);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        assert_eq!(MapViewBuilder::new().build().unwrap(), MapView::default());
        assert_eq!(MapView::builder().build().unwrap(), MapView::default());
    }

    #[test]
    fn test_builder_overrides() {
        let view = MapViewBuilder::new()
            .tilt_deg(0.0)
            .origin(10.0, 20.0)
            .view_size(100.0, 50.0)
            .pixel_density(2)
            .build()
            .unwrap();
        assert_eq!(view.canvas_size(), (200, 100));
        assert_eq!(view.origin(), Point::new(10.0, 20.0));
        assert_eq!(view.tilt(), 0.0);
    }

    #[test]
    fn test_builder_rejects_bad_parameters() {
        assert!(MapViewBuilder::new().view_size(0.0, 10.0).build().is_err());
        assert!(MapViewBuilder::new().view_size(10.0, -1.0).validate().is_err());
        assert!(MapViewBuilder::new().canvas_width(0).build().is_err());
        assert!(MapViewBuilder::new().tilt_deg(f64::NAN).build().is_err());
        assert!(MapViewBuilder::new().pixel_density(0).build().is_err());
        let err = MapViewBuilder::new()
            .origin(f64::INFINITY, 0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidParameter { .. }));
    }

    #[test]
    fn test_pixel_density_uses_final_view_size() {
        let density_first = MapViewBuilder::new()
            .pixel_density(2)
            .view_size(100.0, 50.0)
            .build()
            .unwrap();
        let size_first = MapViewBuilder::new()
            .view_size(100.0, 50.0)
            .pixel_density(2)
            .build()
            .unwrap();
        assert_eq!(density_first, size_first);
        assert_eq!(density_first.canvas_width(), 200);
    }

    #[test]
    fn test_canvas_width_and_density_conflict() {
        let err = MapViewBuilder::new()
            .canvas_width(604)
            .pixel_density(2)
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidParameter { .. }));
        assert!(MapViewBuilder::new()
            .pixel_density(2)
            .canvas_width(604)
            .validate()
            .is_err());
    }

    #[test]
    fn test_to_canvas_untilted() {
        let view = MapViewBuilder::new().tilt_deg(0.0).build().unwrap();
        let p = view.to_canvas(Point::new(0.0, 0.0));
        assert_point_near(p, Point::new(426.0, 136.5), 1e-12);
    }

    #[test]
    fn test_canvas_round_trip() {
        let view = MapView::default();
        for p in [Point::new(-150.0, 86.6), Point::new(12.5, -30.0), Point::ORIGIN] {
            assert_point_near(view.canvas_to_map(view.to_canvas(p)), p, 1e-9);
        }
    }

    #[test]
    fn test_project_reference_cell_corner() {
        let view = MapView::default();
        let p = view.project(LatLon::new(10.0, 30.0), Some(2)).unwrap();
        assert_point_near(p, Point::new(472.4968790099971, 367.611380761625), 1e-9);
    }

    #[test]
    fn test_project_propagates_errors() {
        let view = MapView::default();
        assert!(view.project(LatLon::new(-91.0, 0.0), None).is_err());
        assert!(view.project(LatLon::new(0.0, 0.0), Some(99)).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let original = MapViewBuilder::new().tilt_deg(0.0).canvas_width(1208).build().unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let deserialized: MapView = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, original);
    }
}
