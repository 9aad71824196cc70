//! Planar polygon kernel for parcel boundaries.
//!
//! Purpose
//! - Area, vertical half-plane clipping and vertical scan queries on simple
//!   polygons given as ordered, implicitly closed vertex lists.
//! - Point/segment projection used for snapping and boundary walks.
//!
//! Conventions
//! - Polygons are `&[Point]` without a closing duplicate vertex.
//! - Self-intersecting input is not rejected; results are then meaningless
//!   but every function stays total on finite coordinates.
//! - Tolerances are explicit via `GeomCfg` (side slack, divisions, dedup).
//!
//! Code cross-refs: `crate::partition` (area-left-of search), `crate::measure`.

mod area;
mod clip;
mod project;
pub mod rand;
mod scan;
mod types;

pub use area::{centroid, perimeter, polygon_area, signed_area, x_extent};
pub use clip::clip_vertical;
pub use project::{
    closest_edge, closest_point_on_boundary, closest_point_on_segment, closest_segment_index,
};
pub use scan::{crosses_at_x, cut_segments, intersections_at_x};
pub use types::{BBox2, GeomCfg, Point, Side};
