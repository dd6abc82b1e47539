//! The twelve map areas of the Bat layout and forward projection.
//!
//! The northern hemisphere is four full octants plus one split by the cut
//! through the Bering Strait, all sharing the north pole at the planar
//! origin. The southern hemisphere hangs off that as three lobes, each with
//! its own projected south pole (left, bottom and right), so the southern
//! octants are drawn in seven pieces.
//!
//! | Index | Hemisphere | Center | Longitudes | Latitudes | Pole placement |
//! |-------|------------|--------|------------|-----------|----------------|
//! | 0 | N | -160° | -168.5° .. -115° | 0° .. 90° | north |
//! | 1 | N | -70° | -115° .. -25° | 0° .. 90° | north |
//! | 2 | N | 20° | -25° .. 65° | 0° .. 90° | north |
//! | 3 | N | 110° | 65° .. 155° | 0° .. 90° | north |
//! | 4 | N | -160° | 155° .. -168.5° | 0° .. 90° | north |
//! | 5 | S | -160° | -150° .. -115° | -90° .. 0° | left |
//! | 6 | S | -70° | -115° .. -25° | -90° .. 0° | left |
//! | 7 | S | 20° | -25° .. 15° | -90° .. -45° | left |
//! | 8 | S | 20° | -25° .. 65° | -45° .. 0° | bottom |
//! | 9 | S | 20° | 15° .. 65° | -90° .. -45° | right |
//! | 10 | S | 110° | 65° .. 155° | -90° .. 0° | right |
//! | 11 | S | -160° | 155° .. -150° | -90° .. 0° | right |
//!
//! Neighbouring areas share their edges, and the same edge point can land at
//! different planar positions in the two areas (across the cut, or simply by
//! rounding). [`project`] therefore accepts an explicit area index so that a
//! caller drawing a continuous line can keep all of its vertices in one area.

use cahill_core::constants::{DEGREES_IN_CIRCLE, DEG_TO_RAD, PI_OVER_6};
use cahill_core::utils::to_positive_degrees;
use cahill_core::{Degrees, LatLon, Point};
use once_cell::sync::Lazy;

use crate::error::{MapError, MapResult};
use crate::octant::project_octant;

/// Planar side length of one projected octant.
pub const OCTANT_SCALE: f64 = 100.0;

pub const MAP_AREA_COUNT: usize = 12;

const NORTH_POLE_ORIGIN: Point = Point::new(0.0, 0.0);

/// cos(π/6), the height of the projected south pole lobes above the origin.
fn lobe_offset() -> f64 {
    libm::cos(PI_OVER_6)
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapArea {
    center_lon: f64,
    sw_corner: LatLon<Degrees>,
    ne_corner: LatLon<Degrees>,
    origin: Point,
    angle: f64,
    is_north: bool,
    has_antimeridian: bool,
}

impl MapArea {
    /// `angle_deg` is the direction the octant's altitude points from the
    /// projected pole: 0° points down the page, positive turns clockwise.
    pub fn new(
        center_lon: f64,
        sw_corner: LatLon<Degrees>,
        ne_corner: LatLon<Degrees>,
        origin: Point,
        angle_deg: f64,
    ) -> Self {
        Self {
            center_lon,
            sw_corner,
            ne_corner,
            origin,
            angle: angle_deg * DEG_TO_RAD,
            is_north: ne_corner.lat > 0.0,
            has_antimeridian: sw_corner.lon > ne_corner.lon,
        }
    }

    #[inline]
    pub fn center_lon(&self) -> f64 {
        self.center_lon
    }

    #[inline]
    pub fn sw_corner(&self) -> LatLon<Degrees> {
        self.sw_corner
    }

    #[inline]
    pub fn ne_corner(&self) -> LatLon<Degrees> {
        self.ne_corner
    }

    /// Position of the projected pole before [`OCTANT_SCALE`] is applied.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Placement rotation in radians.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn is_north(&self) -> bool {
        self.is_north
    }

    #[inline]
    pub fn has_antimeridian(&self) -> bool {
        self.has_antimeridian
    }

    /// Bounding-box containment, edges inclusive. Longitude wraps when the
    /// area straddles the antimeridian.
    pub fn contains(&self, coord: LatLon<Degrees>) -> bool {
        let lat_inside = self.sw_corner.lat <= coord.lat && coord.lat <= self.ne_corner.lat;
        let lon_inside = if self.has_antimeridian {
            self.sw_corner.lon <= coord.lon || coord.lon <= self.ne_corner.lon
        } else {
            self.sw_corner.lon <= coord.lon && coord.lon <= self.ne_corner.lon
        };
        lat_inside && lon_inside
    }

    /// Folds `coord` into the reference octant: latitude measured from the
    /// equator regardless of hemisphere, longitude relative to the area's
    /// center.
    pub fn normalize(&self, coord: LatLon<Degrees>) -> LatLon<Degrees> {
        let lon = if self.has_antimeridian {
            to_positive_degrees(coord.lon) - to_positive_degrees(self.center_lon)
        } else {
            coord.lon - self.center_lon
        };
        LatLon::new(coord.lat.abs(), lon)
    }

    /// Projects `coord` into this area's placement, scaled but not tilted.
    ///
    /// No containment check is made: points outside the area are projected
    /// with the same octant math, which is what edge stitching relies on.
    pub fn project(&self, coord: LatLon<Degrees>) -> MapResult<Point> {
        let coord = coord.validate()?;
        let point = project_octant(self.normalize(coord).to_radians());
        let point = if self.is_north {
            point
        } else {
            Point::new(-point.x, point.y)
        };
        Ok(point
            .rotate(self.angle)
            .translate(self.origin)
            .scale(OCTANT_SCALE))
    }

    /// Longitude span in degrees, accounting for the antimeridian.
    pub fn lon_span(&self) -> f64 {
        if self.has_antimeridian {
            self.ne_corner.lon + DEGREES_IN_CIRCLE - self.sw_corner.lon
        } else {
            self.ne_corner.lon - self.sw_corner.lon
        }
    }
}

static MAP_AREAS: Lazy<[MapArea; MAP_AREA_COUNT]> = Lazy::new(|| {
    let h = lobe_offset();
    let south_left = Point::new(-1.5, h);
    let south_bottom = Point::new(0.0, 2.0 * h);
    let south_right = Point::new(1.5, h);
    let n = NORTH_POLE_ORIGIN;

    let areas = [
        MapArea::new(-160.0, LatLon::new(0.0, -168.5), LatLon::new(90.0, -115.0), n, 120.0),
        MapArea::new(-70.0, LatLon::new(0.0, -115.0), LatLon::new(90.0, -25.0), n, 60.0),
        MapArea::new(20.0, LatLon::new(0.0, -25.0), LatLon::new(90.0, 65.0), n, 0.0),
        MapArea::new(110.0, LatLon::new(0.0, 65.0), LatLon::new(90.0, 155.0), n, -60.0),
        MapArea::new(-160.0, LatLon::new(0.0, 155.0), LatLon::new(90.0, -168.5), n, -120.0),
        MapArea::new(-160.0, LatLon::new(-90.0, -150.0), LatLon::new(0.0, -115.0), south_left, 180.0),
        MapArea::new(-70.0, LatLon::new(-90.0, -115.0), LatLon::new(0.0, -25.0), south_left, -120.0),
        MapArea::new(20.0, LatLon::new(-90.0, -25.0), LatLon::new(-45.0, 15.0), south_left, -60.0),
        MapArea::new(20.0, LatLon::new(-45.0, -25.0), LatLon::new(0.0, 65.0), south_bottom, -180.0),
        MapArea::new(20.0, LatLon::new(-90.0, 15.0), LatLon::new(-45.0, 65.0), south_right, 60.0),
        MapArea::new(110.0, LatLon::new(-90.0, 65.0), LatLon::new(0.0, 155.0), south_right, 120.0),
        MapArea::new(-160.0, LatLon::new(-90.0, 155.0), LatLon::new(0.0, -150.0), south_right, 180.0),
    ];
    log::debug!("built {} map areas", areas.len());
    areas
});

/// The fixed table of map areas, built on first use and never modified.
pub fn map_areas() -> &'static [MapArea; MAP_AREA_COUNT] {
    &MAP_AREAS
}

pub fn map_area(index: usize) -> MapResult<&'static MapArea> {
    map_areas()
        .get(index)
        .ok_or_else(|| MapError::area_index_out_of_range(index, MAP_AREA_COUNT))
}

/// Index of the first area whose bounding box contains `coord`.
pub fn find_area(coord: LatLon<Degrees>) -> MapResult<usize> {
    let coord = coord.validate()?;
    map_areas()
        .iter()
        .position(|area| area.contains(coord))
        .ok_or_else(|| MapError::no_containing_area(coord.lat, coord.lon))
}

/// Projects a coordinate in degrees onto the map (scaled, not tilted).
///
/// With `area` set, that area's placement is used even if the point lies
/// outside it; otherwise the first containing area is chosen.
pub fn project(coord: LatLon<Degrees>, area: Option<usize>) -> MapResult<Point> {
    let index = match area {
        Some(index) => index,
        None => find_area(coord)?,
    };
    map_area(index)?.project(coord)
}
