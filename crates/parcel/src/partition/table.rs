use serde::Serialize;

use crate::boundary::Boundary;
use crate::geom2::GeomCfg;
use crate::units::{area_to_unit, AreaUnit, AreaValue, Calibration};

use super::{area_left_of, Cut};

/// One band of the partition, left to right.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaRow {
    /// `P1`, `P2`, ...
    pub label: String,
    pub x_from: f64,
    pub x_to: f64,
    /// Area in boundary units squared (px² or m²).
    pub raw: f64,
    pub area: AreaValue,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaTable {
    pub rows: Vec<AreaRow>,
    pub total: AreaValue,
    /// False when areas are raw px².
    pub calibrated: bool,
}

impl AreaTable {
    pub fn total_raw(&self) -> f64 {
        self.rows.iter().map(|r| r.raw).sum()
    }
}

/// Per-band areas for the current cuts.
///
/// Cuts are sorted first; band `i` spans `[x_{i-1}, x_i]` with `x_0 = min_x`
/// and the last band ending at `max_x`. Band areas are differences of
/// `area_left_of`, clamped at zero. The calibrated total is the sum of the
/// converted bands; the uncalibrated total is the boundary's own px² area.
pub fn compute_area_table(
    boundary: &Boundary,
    cuts: &[Cut],
    unit: AreaUnit,
    calibration: Calibration,
    cfg: GeomCfg,
) -> AreaTable {
    let poly = boundary.points();
    let (min_x, max_x) = boundary.x_extent();
    let mut xs: Vec<f64> = cuts.iter().map(|c| c.x).collect();
    xs.sort_by(f64::total_cmp);
    xs.push(max_x);

    let mut rows = Vec::with_capacity(xs.len());
    let mut prev_x = min_x;
    let mut prev_area = 0.0;
    for (i, x) in xs.into_iter().enumerate() {
        let left = area_left_of(poly, x, cfg);
        let raw = (left - prev_area).max(0.0);
        rows.push(AreaRow {
            label: format!("P{}", i + 1),
            x_from: prev_x,
            x_to: x,
            raw,
            area: calibration.area_value(raw, unit),
        });
        prev_x = x;
        prev_area = left;
    }

    let total = if calibration.is_calibrated() {
        let m2: f64 = rows.iter().filter_map(|r| calibration.area_m2(r.raw)).sum();
        area_to_unit(m2, unit)
    } else {
        calibration.area_value(boundary.area(), unit)
    };
    AreaTable {
        rows,
        total,
        calibrated: calibration.is_calibrated(),
    }
}
