//! Finalized parcel boundary with its provenance.
//!
//! A `Boundary` is an implicitly closed ring of at least 3 vertices. It is
//! replaced wholesale on re-finalization and never mutated in place.

use serde::Serialize;

use crate::error::{ParcelError, Result};
use crate::geo::LatLng;
use crate::geom2::{self, Point};

/// Where the boundary coordinates come from.
#[derive(Clone, Debug, PartialEq)]
pub enum Provenance {
    /// Traced over an image; coordinates are pixels.
    Traced,
    /// Projected from map vertices; coordinates are local meters.
    Geo { lat_lngs: Vec<LatLng> },
}

impl Provenance {
    #[inline]
    pub fn kind(&self) -> SourceKind {
        match self {
            Provenance::Traced => SourceKind::Traced,
            Provenance::Geo { .. } => SourceKind::Geo,
        }
    }
}

/// Provenance tag without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Traced,
    Geo,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    points: Vec<Point>,
    provenance: Provenance,
}

impl Boundary {
    /// Finalize a traced ring. A trailing vertex repeating the first one
    /// (explicitly closed ring) is dropped before the vertex-count check.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        Self::with_provenance(points, Provenance::Traced)
    }

    pub(crate) fn with_provenance(mut points: Vec<Point>, provenance: Provenance) -> Result<Self> {
        if points.len() > 1 {
            let first = points[0];
            let closes = points
                .last()
                .is_some_and(|last| (last - first).norm() < 1e-6);
            if closes {
                points.pop();
            }
        }
        if points.len() < 3 {
            return Err(ParcelError::InsufficientVertices { got: points.len() });
        }
        Ok(Self { points, provenance })
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    #[inline]
    pub fn is_geo(&self) -> bool {
        matches!(self.provenance, Provenance::Geo { .. })
    }

    /// Enclosed area in boundary units squared (px² or m²).
    #[inline]
    pub fn area(&self) -> f64 {
        geom2::polygon_area(&self.points)
    }

    /// `(min_x, max_x)`.
    pub fn x_extent(&self) -> (f64, f64) {
        let x0 = self.points[0].x;
        self.points
            .iter()
            .fold((x0, x0), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)))
    }

    /// Pixel length of the first edge, the reference edge for calibration.
    #[inline]
    pub fn first_edge_length(&self) -> f64 {
        (self.points[1] - self.points[0]).norm()
    }
}
