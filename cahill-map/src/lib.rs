//! The Cahill-Concialdi "Bat" conformal octahedral world map.
//!
//! The sphere is cut into octants, each projected conformally onto an
//! equilateral triangle. The triangles are laid out as a butterfly: a hexagon
//! of northern octants around the north pole, with the southern octants
//! hanging off it in three lobes.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`octant`] | Conformal projection of one octant, polynomial correction |
//! | [`area`] | The twelve map areas, area lookup, [`project`] |
//! | [`cell`] | [`GridCell`] inversion (bilinear and polar) and mask test |
//! | [`view`] | [`MapView`] placement on a canvas, [`MapViewBuilder`] |
//! | [`raster`] | Cell enumeration and per-pixel resampling |
//! | [`error`] | [`MapError`] and [`MapResult`] |
//!
//! # Example
//!
//! ```
//! use cahill_map::{find_area, project};
//! use cahill_core::LatLon;
//!
//! let paris = LatLon::new(48.86, 2.35);
//! assert_eq!(find_area(paris).unwrap(), 2);
//! let p = project(paris, None).unwrap();
//! assert!(p.y > 0.0 && p.y < 100.0);
//! ```
//!
//! # Features
//!
//! - `serde`: (de)serialize map areas, views and samples.
//! - `parallel`: sample the cells of a map area on the rayon thread pool.

pub mod area;
pub mod cell;
pub mod error;
pub mod octant;
pub mod raster;
pub mod view;

pub use area::{find_area, map_area, map_areas, project, MapArea, MAP_AREA_COUNT, OCTANT_SCALE};
pub use cell::{CellPole, GridCell};
pub use error::{MapError, MapResult};
pub use octant::{conformal_correction, project_octant};
pub use raster::{area_cells, plate_carree_offset, sample_area, sample_cell, sample_map, PixelSample};
pub use view::{MapView, MapViewBuilder};
