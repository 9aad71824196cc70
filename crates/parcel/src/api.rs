//! Curated internal API (UNSTABLE).
//!
//! Convenience surface for the CLI, benches and demos. Breaking changes are
//! allowed; prefer these re-exports over reaching into modules.

// Boundary and draft
pub use crate::boundary::{Boundary, Provenance, SourceKind};
pub use crate::draft::{Draft, DraftEvent};
// 2D kernel
pub use crate::geom2::{
    centroid, clip_vertical, closest_point_on_boundary, intersections_at_x, perimeter,
    polygon_area, signed_area, BBox2, GeomCfg, Point, Side,
};
// Random parcels
pub use crate::geom2::rand::{
    draw_convex_parcel, draw_parcel_radial, recenter_rescale, RadialCfg,
    ReplayToken as ParcelReplay, VertexCount,
};
// Geo projection
pub use crate::geo::{
    project_geo_boundary, project_to_local_meters, LatLng, LocalFrame, EARTH_RADIUS_M,
};
// Partitioning
pub use crate::partition::{
    area_left_of, compute_area_table, drag_cut, find_cut, generate_partitions, partition_polygon,
    pick_cut_handle, resolve_drag, AreaRow, AreaTable, Cut, DragOutcome, HandleEnd, HandlePick,
    PartitionCfg,
};
// Measurement
pub use crate::measure::{measure_distance, shortest_boundary_path, Measurement};
// Units and calibration
pub use crate::units::{compute_scale, AreaUnit, AreaValue, Calibration, LengthUnit};
// Session and report
pub use crate::report::{Report, VertexRow};
pub use crate::session::{Reference, Session};
