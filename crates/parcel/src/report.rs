//! Partition report: everything needed to document a split, as plain data.
//!
//! The report is built from a `Session` snapshot and serialized to JSON; the
//! `Display` impl renders a short text summary for terminals.

use std::fmt;

use serde::Serialize;

use crate::boundary::{Provenance, SourceKind};
use crate::error::{ParcelError, Result};
use crate::geom2::perimeter;
use crate::measure::Measurement;
use crate::partition::AreaRow;
use crate::session::Session;
use crate::units::{meters_to_unit, AreaUnit, AreaValue, LengthUnit, PIXEL_LENGTH_LABEL};

/// One row of the vertex coordinate schedule (geo boundaries only).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VertexRow {
    /// `V1`, `V2`, ...
    pub label: String,
    /// Degrees, rounded to 6 decimals.
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub reference_no: String,
    pub generated_at_unix_ms: u64,
    pub partition_count: usize,
    /// e.g. `"10 m"`; None when not given or not used (geo boundaries).
    pub reference_length: Option<String>,
    pub source: SourceKind,
    pub total_area: AreaValue,
    pub calibrated: bool,
    pub perimeter: f64,
    pub perimeter_unit: &'static str,
    pub partitions: Vec<AreaRow>,
    pub cuts: Vec<f64>,
    pub vertices: Vec<VertexRow>,
    pub measurement: Option<Measurement>,
}

impl Report {
    /// Snapshot `session`. Fails with `NoBoundary` before finalization.
    pub fn from_session(
        session: &Session,
        area_unit: AreaUnit,
        length_unit: LengthUnit,
        generated_at_unix_ms: u64,
    ) -> Result<Self> {
        let boundary = session.boundary().ok_or(ParcelError::NoBoundary)?;
        let table = session.area_table(area_unit)?;
        let calibration = session.calibration();

        let raw_perimeter = perimeter(boundary.points());
        let (perimeter, perimeter_unit) = match calibration.length_m(raw_perimeter) {
            Some(m) => (meters_to_unit(m, length_unit), length_unit.symbol()),
            None => (raw_perimeter, PIXEL_LENGTH_LABEL),
        };

        let reference_length = match (boundary.provenance(), session.reference()) {
            (Provenance::Traced, Some(r)) => r.value.map(|v| format!("{v} {}", r.unit)),
            _ => None,
        };

        let vertices = match boundary.provenance() {
            Provenance::Geo { lat_lngs } => lat_lngs
                .iter()
                .enumerate()
                .map(|(i, ll)| VertexRow {
                    label: format!("V{}", i + 1),
                    lat: round6(ll.lat),
                    lng: round6(ll.lng),
                })
                .collect(),
            Provenance::Traced => Vec::new(),
        };

        Ok(Self {
            reference_no: format!("REF-{generated_at_unix_ms}"),
            generated_at_unix_ms,
            partition_count: table.rows.len(),
            reference_length,
            source: boundary.provenance().kind(),
            total_area: table.total,
            calibrated: table.calibrated,
            perimeter,
            perimeter_unit,
            cuts: session.cuts().iter().map(|c| c.x).collect(),
            partitions: table.rows,
            vertices,
            measurement: session.measurement().cloned(),
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[inline]
fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Land partition report {}", self.reference_no)?;
        let source = match self.source {
            SourceKind::Traced => "image trace (local scale)",
            SourceKind::Geo => "map (lat/lng, reference length not required)",
        };
        writeln!(f, "source: {source}")?;
        writeln!(
            f,
            "reference length: {}",
            self.reference_length.as_deref().unwrap_or("n/a")
        )?;
        let suffix = if self.calibrated { "" } else { " (no scale)" };
        writeln!(f, "total area: {}{suffix}", self.total_area)?;
        writeln!(f, "perimeter: {:.3} {}", self.perimeter, self.perimeter_unit)?;
        writeln!(f, "partitions: {}", self.partition_count)?;
        for row in &self.partitions {
            writeln!(f, "  {:<4} {}", row.label, row.area)?;
        }
        for v in &self.vertices {
            writeln!(f, "  {:<4} {:.6}, {:.6}", v.label, v.lat, v.lng)?;
        }
        if let Some(m) = &self.measurement {
            writeln!(f, "boundary distance: {m}")?;
        }
        Ok(())
    }
}
