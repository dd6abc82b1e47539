//! Inverse mapping of projected 1°×1° grid cells.
//!
//! A [`GridCell`] is the projected image of the spherical cell whose
//! south-west corner is `sw_corner`. Its corners are stored counterclockwise
//! on the sphere: SW, SE, NE, NW. Given a planar point inside the cell,
//! [`GridCell::inverse`] recovers the spherical coordinate it came from, which
//! is how a destination pixel finds its sample in a plate carrée source.
//!
//! Ordinary cells are inverted by treating the four corners as a bilinear
//! patch over the unit square. Cells touching a pole collapse to a triangle,
//! because two of their corners project to the same point, and are inverted
//! radially from that point instead.

use cahill_core::constants::TWOPI;
use cahill_core::{Degrees, LatLon, Point};

use crate::error::{MapError, MapResult};

/// Slack allowed around the unit square when accepting a root.
pub const ROOT_TOLERANCE: f64 = 1e-9;

/// Relative size below which the quadratic term is dropped.
const LINEAR_THRESHOLD: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPole {
    North,
    South,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    sw_corner: LatLon<Degrees>,
    corners: [Point; 4],
    mask: Vec<Point>,
    pole: Option<CellPole>,
}

impl GridCell {
    /// Builds a cell from its projected corners and clipping mask.
    ///
    /// The mask is the polygon pixels must fall in to belong to this cell;
    /// it has 3 or 4 vertices.
    pub fn new(sw_corner: LatLon<Degrees>, corners: [Point; 4], mask: &[Point]) -> MapResult<Self> {
        let sw_corner = sw_corner.validate()?;
        if !(3..=4).contains(&mask.len()) {
            return Err(MapError::invalid_cell(format!(
                "mask needs 3 or 4 vertices, got {}",
                mask.len()
            )));
        }
        if corners.iter().chain(mask).any(|p| !p.is_finite()) {
            return Err(MapError::invalid_cell("non-finite corner"));
        }

        let pole = if corners[2] == corners[3] {
            Some(CellPole::North)
        } else if corners[0] == corners[1] {
            Some(CellPole::South)
        } else {
            None
        };

        Ok(Self {
            sw_corner,
            corners,
            mask: mask.to_vec(),
            pole,
        })
    }

    /// A cell masked by its own corners.
    pub fn unmasked(sw_corner: LatLon<Degrees>, corners: [Point; 4]) -> MapResult<Self> {
        Self::new(sw_corner, corners, &corners)
    }

    #[inline]
    pub fn sw_corner(&self) -> LatLon<Degrees> {
        self.sw_corner
    }

    #[inline]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    #[inline]
    pub fn mask(&self) -> &[Point] {
        &self.mask
    }

    #[inline]
    pub fn pole(&self) -> Option<CellPole> {
        self.pole
    }

    #[inline]
    pub fn is_polar(&self) -> bool {
        self.pole.is_some()
    }

    #[inline]
    pub fn is_north_polar(&self) -> bool {
        self.pole == Some(CellPole::North)
    }

    /// Integer pixel bounds of the mask as `(min_x, min_y, max_x, max_y)`,
    /// inclusive on both ends.
    pub fn pixel_bounds(&self) -> (i64, i64, i64, i64) {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.mask {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (
            min_x.floor() as i64,
            min_y.floor() as i64,
            max_x.ceil() as i64,
            max_y.ceil() as i64,
        )
    }

    /// Even-odd crossing test against the mask polygon.
    ///
    /// Each edge is counted over the half-open x range `[min, max)`, so a
    /// vertex shared by two edges is counted once, and vertical edges are
    /// never counted.
    pub fn is_in_mask(&self, point: Point) -> bool {
        let n = self.mask.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.mask[i];
            let b = self.mask[(i + 1) % n];
            if point.x < a.x.min(b.x) || point.x >= a.x.max(b.x) {
                continue;
            }
            let below = point.y >= a.y.max(b.y)
                || (point.y >= a.y.min(b.y)
                    && point.y >= a.y + (point.x - a.x) / (b.x - a.x) * (b.y - a.y));
            if below {
                inside = !inside;
            }
        }
        inside
    }

    /// Spherical coordinate (degrees) of a planar point inside the cell.
    pub fn inverse(&self, point: Point) -> MapResult<LatLon<Degrees>> {
        if self.is_polar() {
            self.inverse_polar(point)
        } else {
            self.inverse_bilinear(point)
        }
    }

    /// Solves the bilinear patch
    ///
    /// ```text
    /// P(x, y) = c0 + (c1 - c0)·x + (c3 - c0)·y + (c0 + c2 - c1 - c3)·x·y
    /// ```
    ///
    /// for the relative longitude `x` and latitude `y` of `point`.
    /// Eliminating `y` leaves `a·x² + b·x + c = 0`, solved with the
    /// cancellation-free form of the quadratic formula. Exactly one root may
    /// put `(x, y)` in the unit square (within [`ROOT_TOLERANCE`]); none is
    /// [`MapError::NoRootInCell`], two distinct ones mean the cell folds over
    /// itself and give [`MapError::InvalidCell`].
    pub fn inverse_bilinear(&self, point: Point) -> MapResult<LatLon<Degrees>> {
        let [c0, c1, c2, c3] = self.corners;
        let j = point.x - c0.x;
        let k = point.y - c0.y;
        let l = c1.x - c0.x;
        let m = c1.y - c0.y;
        let n = c3.x - c0.x;
        let p = c3.y - c0.y;
        let q = c0.x + c2.x - c1.x - c3.x;
        let r = c0.y + c2.y - c1.y - c3.y;

        let a = q * m - l * r;
        let b = j * r + n * m - l * p - q * k;
        let c = j * p - n * k;

        let roots = solve_quadratic(a, b, c)
            .ok_or_else(|| MapError::singularity("degenerate cell: no unique relative longitude"))?;

        let mut found: Option<(f64, f64)> = None;
        for x in roots.into_iter().flatten() {
            // Use whichever of the two eliminations is better conditioned.
            let den_x = n + q * x;
            let den_y = p + r * x;
            let y = if den_x.abs() >= den_y.abs() {
                (j - l * x) / den_x
            } else {
                (k - m * x) / den_y
            };
            if !(in_unit_range(x) && in_unit_range(y)) {
                continue;
            }
            match found {
                None => found = Some((x, y)),
                Some((fx, fy))
                    if (fx - x).abs() > ROOT_TOLERANCE || (fy - y).abs() > ROOT_TOLERANCE =>
                {
                    return Err(MapError::invalid_cell(format!(
                        "cell at ({}, {}) is folded: ({fx}, {fy}) and ({x}, {y}) both map to {point}",
                        self.sw_corner.lat, self.sw_corner.lon
                    )));
                }
                // Double root on the fold line.
                Some(_) => {}
            }
        }

        match found {
            Some((x, y)) => Ok(LatLon::new(self.sw_corner.lat + y, self.sw_corner.lon + x)),
            None => Err(MapError::no_root_in_cell(
                self.sw_corner.lat,
                self.sw_corner.lon,
                format!("no root of {a}x² + {b}x + {c} lands in the unit square"),
            )),
        }
    }

    /// Inverts a cell whose pole side has collapsed to a single point.
    ///
    /// Latitude is linear in the distance from the pole corner relative to
    /// the cell height; longitude is the bearing from the pole corner as a
    /// fraction of the angle the cell spans there. Northern cells sweep
    /// from the SW corner, southern cells from the NW corner.
    pub fn inverse_polar(&self, point: Point) -> MapResult<LatLon<Degrees>> {
        let pole = self.pole.ok_or_else(|| {
            MapError::invalid_cell(format!(
                "cell at ({}, {}) does not touch a pole",
                self.sw_corner.lat, self.sw_corner.lon
            ))
        })?;
        let [c0, c1, c2, c3] = self.corners;
        let north = pole == CellPole::North;
        let apex = if north { c2 } else { c1 };

        let distance = apex.distance_to(point);
        if distance == 0.0 {
            let lat_offset = if north { 1.0 } else { 0.0 };
            return Ok(LatLon::new(self.sw_corner.lat + lat_offset, self.sw_corner.lon));
        }

        let height = c2.distance_to(c1);
        let (rel_lat, width, sweep) = if north {
            let start = apex.angle_to(c0);
            (
                1.0 - distance / height,
                start - apex.angle_to(c1),
                start - apex.angle_to(point),
            )
        } else {
            let start = apex.angle_to(c3);
            (
                distance / height,
                apex.angle_to(c2) - start,
                apex.angle_to(point) - start,
            )
        };

        let rel_lon = positive_angle(sweep) / positive_angle(width);
        Ok(LatLon::new(self.sw_corner.lat + rel_lat, self.sw_corner.lon + rel_lon))
    }
}

/// Real roots of `a·x² + b·x + c`. Returns `None` when
/// both `a` and `b` vanish.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<[Option<f64>; 2]> {
    if a.abs() <= LINEAR_THRESHOLD * b.abs() {
        if b == 0.0 {
            return None;
        }
        return Some([Some(-c / b), None]);
    }

    // Slightly negative discriminants come from rounding on tangent roots.
    let disc = (b * b - 4.0 * a * c).max(0.0);
    let q = -0.5 * (b + libm::sqrt(disc).copysign(b));
    if q == 0.0 {
        // b and c are both zero
        return Some([Some(0.0), None]);
    }
    Some([Some(q / a), Some(c / q)])
}

#[inline]
fn in_unit_range(v: f64) -> bool {
    (-ROOT_TOLERANCE..=1.0 + ROOT_TOLERANCE).contains(&v)
}

#[inline]
fn positive_angle(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + TWOPI
    } else {
        angle
    }
}
