//! Equal-area parcel partitioning.
//!
//! A land parcel is a simple polygon, traced over an image (pixel units, with
//! an optional reference length for scale) or given as lat/lng vertices
//! (projected to local meters). The parcel is split by vertical cuts into
//! bands of equal area; cuts can then be dragged, areas tabulated in real
//! units, and distances measured along the boundary.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - `api` is the curated surface for callers (CLI, benches).

pub mod api;
pub mod boundary;
pub mod draft;
pub mod error;
pub mod geo;
pub mod geom2;
pub mod measure;
pub mod partition;
pub mod report;
pub mod session;
pub mod units;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{ParcelError, Result};
pub use geom2::GeomCfg;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::boundary::{Boundary, SourceKind};
    pub use crate::error::{ParcelError, Result};
    pub use crate::geo::LatLng;
    pub use crate::geom2::{GeomCfg, Point};
    pub use crate::partition::{Cut, PartitionCfg};
    pub use crate::session::Session;
    pub use crate::units::{AreaUnit, LengthUnit};
    pub use nalgebra::Vector2 as Vec2;
}
