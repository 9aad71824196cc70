//! Equal-area partitioning of a boundary by vertical cuts.
//!
//! Purpose
//! - Place `n − 1` vertical cuts so that the `n` bands between consecutive
//!   cuts (and the boundary's x-extent) have equal area.
//! - Move a single cut under a drag, bounded by its neighbours.
//! - Recompute the per-band area table after either.
//!
//! Model
//! - `area_left_of(x)` is the area of the boundary clipped to `x' <= x`. It is
//!   non-decreasing on `[min_x, max_x]`, from 0 to the total area, so each cut
//!   is a bisection root of `area_left_of(x) = total·i/n`.
//! - Bisection runs a fixed number of iterations (`PartitionCfg::iterations`,
//!   60 by default); the cost per cut is bounded regardless of shape.
//! - Cuts are vertical only. Boundaries whose bands are not x-monotone (deep
//!   concavities) get bands that are non-contiguous; that is accepted.
//!
//! Code cross-refs: `crate::geom2::{clip_vertical, intersections_at_x}`.

mod drag;
mod table;

pub use drag::{
    drag_bounds, drag_cut, pick_cut_handle, resolve_drag, DragOutcome, HandleEnd, HandlePick,
};
pub use table::{compute_area_table, AreaRow, AreaTable};

use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::error::{ParcelError, Result};
use crate::geom2::{clip_vertical, polygon_area, x_extent, GeomCfg, Point, Side};

/// Vertical cut line at `x`, in boundary coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub x: f64,
}

impl Cut {
    #[inline]
    pub fn new(x: f64) -> Self {
        Self { x }
    }
}

/// Partitioner configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartitionCfg {
    /// Fixed bisection iterations per cut.
    pub iterations: usize,
    /// Minimum gap kept between a dragged cut and its neighbours.
    pub drag_gap: f64,
    /// Probe step is the drag range divided by this.
    pub probe_divisions: f64,
    /// Probe offsets, in steps, tried in order when a dragged cut misses the boundary.
    pub probe_offsets: [f64; 5],
    pub geom: GeomCfg,
}

impl Default for PartitionCfg {
    fn default() -> Self {
        Self {
            iterations: 60,
            drag_gap: 1e-3,
            probe_divisions: 100.0,
            probe_offsets: [0.0, -1.0, 1.0, -2.0, 2.0],
            geom: GeomCfg::default(),
        }
    }
}

/// Area of `poly` left of the vertical line `x`.
#[inline]
pub fn area_left_of(poly: &[Point], x: f64, cfg: GeomCfg) -> f64 {
    polygon_area(&clip_vertical(poly, x, Side::Left, cfg))
}

/// Bisection for the `x` in `[lo, hi]` where `area_left_of(x)` reaches `target`.
pub fn find_cut(poly: &[Point], target: f64, lo: f64, hi: f64, cfg: PartitionCfg) -> f64 {
    let mut left = lo;
    let mut right = hi;
    for _ in 0..cfg.iterations {
        let mid = 0.5 * (left + right);
        if area_left_of(poly, mid, cfg.geom) < target {
            left = mid;
        } else {
            right = mid;
        }
    }
    0.5 * (left + right)
}

/// Place `n − 1` cuts splitting `boundary` into `n` equal-area bands.
///
/// Cuts come out sorted ascending. `n = 1` yields no cuts.
pub fn generate_partitions(boundary: &Boundary, n: usize, cfg: PartitionCfg) -> Result<Vec<Cut>> {
    partition_polygon(boundary.points(), n, cfg)
}

/// `generate_partitions` on a raw vertex list.
pub fn partition_polygon(poly: &[Point], n: usize, cfg: PartitionCfg) -> Result<Vec<Cut>> {
    if poly.len() < 3 {
        return Err(ParcelError::InsufficientVertices { got: poly.len() });
    }
    if n == 0 {
        return Err(ParcelError::InvalidPartitionCount);
    }
    let total = polygon_area(poly);
    if total <= 0.0 || !total.is_finite() {
        return Err(ParcelError::DegenerateArea);
    }
    let Some((min_x, max_x)) = x_extent(poly) else {
        return Err(ParcelError::InsufficientVertices { got: 0 });
    };
    let cuts = (1..n)
        .map(|i| {
            let target = total * (i as f64) / (n as f64);
            Cut::new(find_cut(poly, target, min_x, max_x, cfg))
        })
        .collect();
    Ok(cuts)
}
