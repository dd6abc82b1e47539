//! Resampling a plate carrée raster into the projection.
//!
//! Each map area is cut into 1°×1° grid cells, every cell corner is projected
//! through the area's placement and the [`MapView`], and each canvas pixel
//! that falls inside a cell's mask is inverted back to a spherical
//! coordinate. The caller reads the source image at that coordinate (see
//! [`plate_carree_offset`]) and writes the pixel; no pixel buffers live here.
//!
//! Areas that end on a fractional longitude (the cut at −168.5° through the
//! Bering Strait) get half cells: the cell keeps its full 1° corners for
//! inversion, but its mask is clipped to the area's edge.

use cahill_core::constants::{DEGREES_IN_CIRCLE, MAX_LATITUDE_DEG};
use cahill_core::{Degrees, LatLon, Point};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::area::{map_area, MAP_AREA_COUNT};
use crate::cell::GridCell;
use crate::error::MapResult;
use crate::view::MapView;

/// Pixels per degree of the reference source rasters.
pub const SOURCE_RASTER_PPD: u32 = 10;

/// A canvas pixel and the spherical coordinate it samples.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelSample {
    pub x: i64,
    pub y: i64,
    pub coord: LatLon<Degrees>,
}

/// Projected grid cells of map area `index`, in canvas pixels.
pub fn area_cells(index: usize, view: &MapView) -> MapResult<Vec<GridCell>> {
    let area = map_area(index)?;
    let sw = area.sw_corner();
    // Past 180° for areas across the antimeridian.
    let east = sw.lon + area.lon_span();

    let lat_range = sw.lat.floor() as i32..area.ne_corner().lat.ceil() as i32;
    let lon_range = sw.lon.floor() as i32..east.ceil() as i32;

    let mut cells = Vec::with_capacity(lat_range.len() * lon_range.len());
    for lat in lat_range {
        let lat = f64::from(lat);
        for lon in lon_range.clone() {
            let lon = f64::from(lon);
            let masked_west = lon.max(sw.lon);
            let masked_east = (lon + 1.0).min(east);

            let place = |lat: f64, lon: f64| view.project(LatLon::new(lat, lon), Some(index));
            let corners = [
                place(lat, lon)?,
                place(lat, lon + 1.0)?,
                place(lat + 1.0, lon + 1.0)?,
                place(lat + 1.0, lon)?,
            ];
            let mask = [
                place(lat, masked_west)?,
                place(lat, masked_east)?,
                place(lat + 1.0, masked_east)?,
                place(lat + 1.0, masked_west)?,
            ];
            cells.push(GridCell::new(LatLon::new(lat, lon), corners, &mask)?);
        }
    }
    Ok(cells)
}

/// Every pixel inside the cell's mask, with its inverted coordinate.
///
/// Pixels whose inversion fails are logged and left out.
pub fn sample_cell(cell: &GridCell) -> Vec<PixelSample> {
    let (min_x, min_y, max_x, max_y) = cell.pixel_bounds();
    let mut samples = Vec::new();
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            let pixel = Point::new(x as f64, y as f64);
            if !cell.is_in_mask(pixel) {
                log::trace!("pixel ({}, {}) outside mask of cell {}", x, y, cell.sw_corner());
                continue;
            }
            match cell.inverse(pixel) {
                Ok(coord) => samples.push(PixelSample { x, y, coord }),
                Err(err) => log::warn!("skipping pixel ({}, {}): {}", x, y, err),
            }
        }
    }
    samples
}

/// Samples every cell of map area `index`.
pub fn sample_area(index: usize, view: &MapView) -> MapResult<Vec<PixelSample>> {
    let cells = area_cells(index, view)?;

    #[cfg(feature = "parallel")]
    let samples: Vec<PixelSample> = cells.par_iter().flat_map_iter(sample_cell).collect();

    #[cfg(not(feature = "parallel"))]
    let samples: Vec<PixelSample> = cells.iter().flat_map(sample_cell).collect();

    log::debug!(
        "map area {}: {} cells, {} pixels",
        index,
        cells.len(),
        samples.len()
    );
    Ok(samples)
}

/// Samples all twelve map areas, in table order.
pub fn sample_map(view: &MapView) -> MapResult<Vec<PixelSample>> {
    let mut samples = Vec::new();
    for index in 0..MAP_AREA_COUNT {
        samples.extend(sample_area(index, view)?);
    }
    log::debug!("sampled {} pixels", samples.len());
    Ok(samples)
}

/// `(column, row)` of `coord` in a whole-world plate carrée image with
/// `pixels_per_degree` resolution. Column 0 is at −180°, row 0 at the north
/// pole. Longitudes past ±180° wrap; the far edges clamp to the last
/// column and row.
pub fn plate_carree_offset(coord: LatLon<Degrees>, pixels_per_degree: u32) -> (usize, usize) {
    let ppd = f64::from(pixels_per_degree);
    let columns = (DEGREES_IN_CIRCLE * ppd) as usize;
    let rows = (2.0 * MAX_LATITUDE_DEG * ppd) as usize;

    let x = (coord.lon + DEGREES_IN_CIRCLE / 2.0).rem_euclid(DEGREES_IN_CIRCLE);
    let y = (MAX_LATITUDE_DEG - coord.lat).clamp(0.0, 2.0 * MAX_LATITUDE_DEG);

    let column = ((ppd * x).floor() as usize).min(columns.saturating_sub(1));
    let row = ((ppd * y).floor() as usize).min(rows.saturating_sub(1));
    (column, row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MapViewBuilder;

    #[test]
    fn test_cell_counts() {
        let view = MapView::default();
        assert_eq!(area_cells(2, &view).unwrap().len(), 90 * 90);
        // -168.5 .. -115 starts on a half cell
        assert_eq!(area_cells(0, &view).unwrap().len(), 90 * 54);
        // 155 .. 191.5 ends on one
        assert_eq!(area_cells(4, &view).unwrap().len(), 90 * 37);
        assert_eq!(area_cells(7, &view).unwrap().len(), 45 * 40);
    }

    #[test]
    fn test_area_cells_bad_index() {
        assert!(area_cells(12, &MapView::default()).is_err());
    }

    #[test]
    fn test_half_cell_mask_is_narrower() {
        let view = MapView::default();
        let cells = area_cells(0, &view).unwrap();
        let first = &cells[0];
        assert_eq!(first.sw_corner(), LatLon::new(0.0, -169.0));
        assert_ne!(first.mask()[0], first.corners()[0]);
        assert_eq!(first.mask()[1], first.corners()[1]);
        // A whole cell's mask is its corners.
        assert_eq!(cells[1].mask(), &cells[1].corners()[..]);
    }

    #[test]
    fn test_polar_rows() {
        let view = MapView::default();
        let cells = area_cells(2, &view).unwrap();
        let north = cells.iter().filter(|c| c.is_north_polar()).count();
        assert_eq!(north, 90);
        assert!(cells.iter().filter(|c| c.is_polar()).all(|c| c.sw_corner().lat == 89.0));

        let cells = area_cells(9, &view).unwrap();
        let south: Vec<_> = cells.iter().filter(|c| c.is_polar()).collect();
        assert_eq!(south.len(), 50);
        assert!(south.iter().all(|c| !c.is_north_polar() && c.sw_corner().lat == -90.0));
    }

    #[test]
    fn test_sample_cell_stays_in_cell() {
        let view = MapView::default();
        let cells = area_cells(2, &view).unwrap();
        let cell = cells
            .iter()
            .find(|c| c.sw_corner() == LatLon::new(10.0, 30.0))
            .unwrap();
        let samples = sample_cell(cell);
        assert!(!samples.is_empty());
        for s in &samples {
            assert!(cell.is_in_mask(Point::new(s.x as f64, s.y as f64)));
            assert!(s.coord.lat >= 10.0 - 1e-6 && s.coord.lat <= 11.0 + 1e-6);
            assert!(s.coord.lon >= 30.0 - 1e-6 && s.coord.lon <= 31.0 + 1e-6);
        }
    }

    #[test]
    fn test_sample_area_reprojects_near_pixel() {
        let view = MapView::default();
        let samples = sample_area(2, &view).unwrap();
        assert!(samples.len() > 30_000);
        for s in samples.iter().step_by(37) {
            assert!(s.coord.lat >= -0.01 && s.coord.lat <= 90.0);
            assert!(s.coord.lon >= -25.01 && s.coord.lon <= 65.01);
            let back = view.project(s.coord, Some(2)).unwrap();
            let d = back.distance_to(Point::new(s.x as f64, s.y as f64));
            assert!(d < 2.0, "pixel ({}, {}) came back {} px away", s.x, s.y, d);
        }
    }

    #[test]
    fn test_sample_map_small_canvas() {
        let view = MapViewBuilder::new().pixel_density(1).build().unwrap();
        let samples = sample_map(&view).unwrap();
        let (width, height) = view.canvas_size();
        assert!(!samples.is_empty());
        let inside = samples
            .iter()
            .filter(|s| s.x >= 0 && s.y >= 0 && s.x < width as i64 && s.y < height as i64)
            .count();
        // The butterfly fits the canvas up to a rim of edge pixels.
        assert!(inside as f64 > 0.99 * samples.len() as f64);
    }

    #[test]
    fn test_plate_carree_offset() {
        assert_eq!(plate_carree_offset(LatLon::new(90.0, -180.0), SOURCE_RASTER_PPD), (0, 0));
        assert_eq!(plate_carree_offset(LatLon::new(0.0, 0.0), SOURCE_RASTER_PPD), (1800, 900));
        assert_eq!(plate_carree_offset(LatLon::new(-90.0, 179.99), 10), (3599, 1799));
        // Wrapped longitude from a tile past the antimeridian
        assert_eq!(plate_carree_offset(LatLon::new(45.0, 191.5), 10), (115, 450));
        assert_eq!(plate_carree_offset(LatLon::new(45.0, -168.5), 10), (115, 450));
        assert_eq!(plate_carree_offset(LatLon::new(0.0, 180.0), 1), (0, 90));
    }
}
