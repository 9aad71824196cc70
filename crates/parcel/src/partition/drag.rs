//! Interactive cut dragging and handle hit-testing.
//!
//! A dragged cut is clamped between its neighbours (kept `drag_gap` apart) or
//! the boundary's x-extent. If the clamped line misses the boundary (it sits
//! in a concavity gap), a fixed set of nearby offsets is probed; if none hits,
//! the drag is rejected and the cut stays where it was. This is a bounded
//! heuristic, not a general fix for non-convex boundaries.

use crate::boundary::Boundary;
use crate::error::{ParcelError, Result};
use crate::geom2::{crosses_at_x, cut_segments, GeomCfg, Point};

use super::{Cut, PartitionCfg};

/// Result of a drag step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    Moved { x: f64 },
    /// No valid position nearby; the cut kept `kept`.
    Rejected { kept: f64 },
}

/// Which end of a cut segment was grabbed. `Top` is the smaller y (screen coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleEnd {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandlePick {
    pub index: usize,
    pub end: HandleEnd,
    /// Handle position.
    pub at: Point,
}

/// Allowed x-range `[left, right]` for cut `index`. Empty (`left > right`)
/// when the neighbours sit closer than `2·drag_gap`.
pub fn drag_bounds(
    boundary: &Boundary,
    cuts: &[Cut],
    index: usize,
    cfg: PartitionCfg,
) -> Result<(f64, f64)> {
    if index >= cuts.len() {
        return Err(ParcelError::CutIndexOutOfRange {
            index,
            len: cuts.len(),
        });
    }
    let (min_x, max_x) = boundary.x_extent();
    let left = match index.checked_sub(1) {
        Some(prev) => cuts[prev].x + cfg.drag_gap,
        None => min_x,
    };
    let right = match cuts.get(index + 1) {
        Some(next) => next.x - cfg.drag_gap,
        None => max_x,
    };
    Ok((left, right))
}

/// New position for cut `index` when dragged to `proposed_x`, without mutating anything.
pub fn resolve_drag(
    boundary: &Boundary,
    cuts: &[Cut],
    index: usize,
    proposed_x: f64,
    cfg: PartitionCfg,
) -> Result<f64> {
    let (left, right) = drag_bounds(boundary, cuts, index, cfg)?;
    let unresolvable = ParcelError::UnresolvableCutPosition {
        index,
        proposed: proposed_x,
    };
    // Neighbours closer than 2·drag_gap leave no room to move.
    if left > right {
        return Err(unresolvable);
    }
    let poly = boundary.points();
    let clamped = proposed_x.clamp(left, right);
    if crosses_at_x(clamped, poly, cfg.geom) {
        return Ok(clamped);
    }
    let mut step = (right - left) / cfg.probe_divisions;
    if step == 0.0 || !step.is_finite() {
        step = 1.0;
    }
    cfg.probe_offsets
        .iter()
        .map(|k| clamped + k * step)
        .filter(|x| (left..=right).contains(x))
        .find(|&x| crosses_at_x(x, poly, cfg.geom))
        .ok_or(unresolvable)
}

/// Drag cut `index` towards `proposed_x`, updating `cuts` in place when a
/// valid position is found. An out-of-range index is an error; an
/// unresolvable position is a `Rejected` outcome.
pub fn drag_cut(
    boundary: &Boundary,
    cuts: &mut [Cut],
    index: usize,
    proposed_x: f64,
    cfg: PartitionCfg,
) -> Result<DragOutcome> {
    match resolve_drag(boundary, cuts, index, proposed_x, cfg) {
        Ok(x) => {
            cuts[index].x = x;
            Ok(DragOutcome::Moved { x })
        }
        Err(ParcelError::UnresolvableCutPosition { .. }) => Ok(DragOutcome::Rejected {
            kept: cuts[index].x,
        }),
        Err(e) => Err(e),
    }
}

/// First cut handle (segment end) within `tolerance` of `p`.
pub fn pick_cut_handle(
    boundary: &Boundary,
    cuts: &[Cut],
    p: Point,
    tolerance: f64,
    cfg: GeomCfg,
) -> Option<HandlePick> {
    cuts.iter().enumerate().find_map(|(index, cut)| {
        cut_segments(cut.x, boundary.points(), cfg)
            .into_iter()
            .flat_map(|(y0, y1)| [(HandleEnd::Top, y0), (HandleEnd::Bottom, y1)])
            .map(|(end, y)| (end, Point::new(cut.x, y)))
            .find(|(_, at)| (at - p).norm() <= tolerance)
            .map(|(end, at)| HandlePick { index, end, at })
    })
}
