//! Geospatial layer for the NORAD display.
//!
//! Great-circle sampling on the WGS-84 ellipsoid, equirectangular
//! projection, antimeridian splitting and GeoJSON map geometry.

pub use norad_core as core;

pub mod geodesic;
pub mod projection;
pub mod seam;
pub mod shapes;

// Re-export key types for convenience.
pub use geodesic::{sample_arc, sample_geodesic};
pub use projection::Equirectangular;
pub use seam::{split_at_antimeridian, split_on_seam};
pub use shapes::{GeometryError, MapGeometry, Shape};
