//! Single active parcel session.
//!
//! Holds everything the interactive layer mutates between events: the draft
//! being digitized, the finalized boundary, the cut list, the reference
//! length (and derived scale), the active drag and the last measurement.
//! Every operation takes the current state and leaves a consistent one;
//! failures leave the session unchanged.

use crate::boundary::Boundary;
use crate::draft::{Draft, DraftEvent};
use crate::error::{ParcelError, Result};
use crate::geo::{project_geo_boundary, LatLng};
use crate::geom2::Point;
use crate::measure::{measure_distance, Measurement};
use crate::partition::{
    compute_area_table, drag_cut, generate_partitions, pick_cut_handle, AreaTable, Cut,
    DragOutcome, HandleEnd, HandlePick, PartitionCfg,
};
use crate::units::{compute_scale, AreaUnit, Calibration, LengthUnit};

/// User-supplied reference length, laid along the boundary's first edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reference {
    pub value: Option<f64>,
    pub unit: LengthUnit,
}

/// Cut currently being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveDrag {
    pub index: usize,
    pub end: HandleEnd,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    cfg: PartitionCfg,
    draft: Draft,
    boundary: Option<Boundary>,
    cuts: Vec<Cut>,
    reference: Option<Reference>,
    scale: Option<f64>,
    drag: Option<ActiveDrag>,
    measurement: Option<Measurement>,
}

impl Session {
    pub fn new(cfg: PartitionCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    #[inline]
    pub fn cfg(&self) -> PartitionCfg {
        self.cfg
    }

    /// Drop everything except the configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.cfg);
    }

    // --- draft ---

    pub fn push_vertex(&mut self, p: Point, close_tolerance: f64) -> DraftEvent {
        self.draft.push(p, close_tolerance)
    }

    pub fn undo_vertex(&mut self) -> Option<Point> {
        self.draft.undo()
    }

    pub fn redo_vertex(&mut self) -> Option<Point> {
        self.draft.redo()
    }

    #[inline]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    // --- boundary ---

    /// Finalize the draft as a traced boundary. On failure the draft is kept.
    pub fn finalize_draft(&mut self) -> Result<&Boundary> {
        let boundary = Boundary::from_points(self.draft.points().to_vec())?;
        self.draft.take();
        Ok(self.install(boundary))
    }

    /// Finalize a traced boundary from explicit vertices.
    pub fn finalize_boundary(&mut self, points: Vec<Point>) -> Result<&Boundary> {
        let boundary = Boundary::from_points(points)?;
        Ok(self.install(boundary))
    }

    /// Finalize a map-drawn boundary (projected to local meters).
    pub fn finalize_geo(&mut self, lat_lngs: &[LatLng]) -> Result<&Boundary> {
        let boundary = project_geo_boundary(lat_lngs)?;
        Ok(self.install(boundary))
    }

    fn install(&mut self, boundary: Boundary) -> &Boundary {
        tracing::info!(
            vertices = boundary.points().len(),
            geo = boundary.is_geo(),
            area = boundary.area(),
            "boundary finalized"
        );
        self.cuts.clear();
        self.drag = None;
        self.measurement = None;
        self.draft = Draft::default();
        let boundary = self.boundary.insert(boundary);
        self.scale = match (&self.reference, boundary.is_geo()) {
            (Some(r), false) => compute_scale(boundary.points(), r.value, r.unit),
            _ => None,
        };
        boundary
    }

    #[inline]
    pub fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_ref()
    }

    fn require_boundary(&self) -> Result<&Boundary> {
        self.boundary.as_ref().ok_or(ParcelError::NoBoundary)
    }

    // --- calibration ---

    /// Set (or clear, with `value = None`) the reference length; the scale is
    /// recomputed immediately. An invalid reference leaves no scale.
    pub fn set_reference(&mut self, value: Option<f64>, unit: LengthUnit) {
        self.reference = Some(Reference { value, unit });
        self.recompute_scale();
    }

    fn recompute_scale(&mut self) {
        self.scale = match (&self.boundary, &self.reference) {
            (Some(b), Some(r)) if !b.is_geo() => compute_scale(b.points(), r.value, r.unit),
            _ => None,
        };
        if self.scale.is_none() && self.reference.is_some() {
            tracing::debug!("no scale: reference length unusable");
        }
    }

    #[inline]
    pub fn reference(&self) -> Option<Reference> {
        self.reference
    }

    /// Meters per pixel, if calibrated from a reference length.
    #[inline]
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn calibration(&self) -> Calibration {
        match &self.boundary {
            Some(b) => Calibration::resolve(b, self.scale),
            None => Calibration::Uncalibrated,
        }
    }

    // --- partitions ---

    /// Replace the cuts with `n` equal-area bands; `n` is clamped to at least 1.
    pub fn generate(&mut self, n: usize) -> Result<&[Cut]> {
        let n = n.max(1);
        let cuts = generate_partitions(self.require_boundary()?, n, self.cfg)?;
        tracing::info!(n, cuts = cuts.len(), "partitions generated");
        self.cuts = cuts;
        self.drag = None;
        Ok(&self.cuts)
    }

    #[inline]
    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    /// Grab the cut handle under `p`, if any, and make it the active drag.
    pub fn begin_drag(&mut self, p: Point, tolerance: f64) -> Option<HandlePick> {
        let boundary = self.boundary.as_ref()?;
        let pick = pick_cut_handle(boundary, &self.cuts, p, tolerance, self.cfg.geom)?;
        self.drag = Some(ActiveDrag {
            index: pick.index,
            end: pick.end,
        });
        Some(pick)
    }

    /// Move the active drag towards `x`. `Ok(None)` when nothing is being dragged.
    pub fn drag_to(&mut self, x: f64) -> Result<Option<DragOutcome>> {
        let Some(ActiveDrag { index, .. }) = self.drag else {
            return Ok(None);
        };
        self.drag_cut(index, x).map(Some)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    #[inline]
    pub fn active_drag(&self) -> Option<ActiveDrag> {
        self.drag
    }

    /// Drag cut `index` towards `x`. A rejected move keeps the old position.
    pub fn drag_cut(&mut self, index: usize, x: f64) -> Result<DragOutcome> {
        let boundary = self.boundary.as_ref().ok_or(ParcelError::NoBoundary)?;
        let outcome = drag_cut(boundary, &mut self.cuts, index, x, self.cfg)?;
        if let DragOutcome::Rejected { kept } = outcome {
            tracing::debug!(index, proposed = x, kept, "drag rejected");
        }
        Ok(outcome)
    }

    pub fn area_table(&self, unit: AreaUnit) -> Result<AreaTable> {
        let boundary = self.require_boundary()?;
        Ok(compute_area_table(
            boundary,
            &self.cuts,
            unit,
            self.calibration(),
            self.cfg.geom,
        ))
    }

    // --- measurement ---

    /// Measure along the boundary between `a` and `b`; the result is kept as
    /// the session's current measurement.
    pub fn measure(&mut self, a: Point, b: Point, unit: LengthUnit) -> Result<&Measurement> {
        let boundary = self.require_boundary()?;
        let m = measure_distance(boundary, a, b, self.calibration(), unit, self.cfg.geom);
        tracing::debug!(raw = m.raw, value = m.value, "measured");
        Ok(self.measurement.insert(m))
    }

    #[inline]
    pub fn measurement(&self) -> Option<&Measurement> {
        self.measurement.as_ref()
    }

    pub fn clear_measurement(&mut self) {
        self.measurement = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 40.0),
            Point::new(0.0, 40.0),
        ]
    }

    #[test]
    fn operations_need_a_boundary() {
        let mut s = Session::default();
        assert_eq!(s.generate(2).unwrap_err(), ParcelError::NoBoundary);
        assert_eq!(s.area_table(AreaUnit::M2).unwrap_err(), ParcelError::NoBoundary);
        assert_eq!(s.drag_cut(0, 1.0).unwrap_err(), ParcelError::NoBoundary);
        assert!(s.begin_drag(Point::zeros(), 5.0).is_none());
        assert_eq!(s.calibration(), Calibration::Uncalibrated);
    }

    #[test]
    fn draft_to_partition_flow() {
        let mut s = Session::default();
        for p in rect_points() {
            assert_eq!(s.push_vertex(p, 6.0), DraftEvent::Added);
        }
        assert_eq!(s.push_vertex(Point::new(2.0, 2.0), 6.0), DraftEvent::Closed);
        assert_eq!(s.finalize_draft().unwrap().points().len(), 4);
        assert!(s.draft().is_empty());

        s.set_reference(Some(10.0), LengthUnit::M);
        assert!((s.scale().unwrap() - 0.1).abs() < 1e-15);

        let cuts = s.generate(4).unwrap().to_vec();
        assert_eq!(cuts.len(), 3);
        let table = s.area_table(AreaUnit::M2).unwrap();
        // 100 × 40 px at 0.1 m/px = 40 m², 10 m² per band.
        for row in &table.rows {
            assert!((row.area.value - 10.0).abs() < 1e-9);
        }
        assert!((table.total.value - 40.0).abs() < 1e-9);
    }

    #[test]
    fn failed_finalize_keeps_state() {
        let mut s = Session::default();
        s.finalize_boundary(rect_points()).unwrap();
        s.generate(2).unwrap();
        s.push_vertex(Point::new(1.0, 1.0), 6.0);
        assert_eq!(
            s.finalize_draft().unwrap_err(),
            ParcelError::InsufficientVertices { got: 1 }
        );
        assert_eq!(s.draft().len(), 1);
        assert_eq!(s.cuts().len(), 1);
        assert!(s.boundary().is_some());
    }

    #[test]
    fn refinalize_clears_cuts_and_measurement() {
        let mut s = Session::default();
        s.finalize_boundary(rect_points()).unwrap();
        s.generate(3).unwrap();
        s.measure(Point::new(0.0, 0.0), Point::new(100.0, 40.0), LengthUnit::M)
            .unwrap();
        assert!(s.measurement().is_some());
        s.finalize_boundary(rect_points()).unwrap();
        assert!(s.cuts().is_empty());
        assert!(s.measurement().is_none());
    }

    #[test]
    fn zero_count_is_clamped_to_one() {
        let mut s = Session::default();
        s.finalize_boundary(rect_points()).unwrap();
        assert!(s.generate(0).unwrap().is_empty());
        assert_eq!(s.area_table(AreaUnit::M2).unwrap().rows.len(), 1);
    }

    #[test]
    fn drag_via_handle() {
        let mut s = Session::default();
        s.finalize_boundary(rect_points()).unwrap();
        s.generate(2).unwrap();
        let pick = s.begin_drag(Point::new(51.0, 39.0), 3.0).unwrap();
        assert_eq!(pick.index, 0);
        assert_eq!(pick.end, HandleEnd::Bottom);
        assert_eq!(s.drag_to(30.0), Ok(Some(DragOutcome::Moved { x: 30.0 })));
        let table = s.area_table(AreaUnit::M2).unwrap();
        assert!((table.rows[0].raw - 1200.0).abs() < 1e-9);
        assert!((table.rows[1].raw - 2800.0).abs() < 1e-9);
        s.end_drag();
        assert_eq!(s.drag_to(70.0), Ok(None));
        assert_eq!(s.cuts()[0].x, 30.0);
    }

    #[test]
    fn stale_drag_reports_error_not_idle() {
        let mut s = Session::default();
        s.finalize_boundary(rect_points()).unwrap();
        s.generate(2).unwrap();
        s.drag = Some(ActiveDrag {
            index: 4,
            end: HandleEnd::Top,
        });
        assert_eq!(
            s.drag_to(10.0),
            Err(ParcelError::CutIndexOutOfRange { index: 4, len: 1 })
        );
        assert!((s.cuts()[0].x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn geo_boundary_ignores_pixel_scale() {
        let mut s = Session::default();
        s.set_reference(Some(10.0), LengthUnit::M);
        let verts = [
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.001),
            LatLng::new(0.001, 0.001),
            LatLng::new(0.001, 0.0),
        ];
        s.finalize_geo(&verts).unwrap();
        assert_eq!(s.scale(), None);
        assert_eq!(s.calibration(), Calibration::Metric);
        let m = s
            .measure(Point::new(-100.0, 0.0), Point::new(100.0, 0.0), LengthUnit::M)
            .unwrap();
        assert!(m.is_scaled());
    }

    #[test]
    fn invalid_reference_falls_back_to_pixels() {
        let mut s = Session::default();
        s.finalize_boundary(rect_points()).unwrap();
        s.set_reference(Some(-1.0), LengthUnit::M);
        assert_eq!(s.scale(), None);
        let t = s.area_table(AreaUnit::Acre).unwrap();
        assert!(!t.calibrated);
        assert!((t.total.value - 4000.0).abs() < 1e-9);
        s.reset();
        assert!(s.boundary().is_none());
        assert!(s.reference().is_none());
    }
}
