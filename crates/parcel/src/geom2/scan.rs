//! Vertical scan-line queries: where does `x = const` meet the boundary.

use super::types::{GeomCfg, Point};

/// Sorted, de-duplicated y-values where the vertical line `x` meets the edges of `poly`.
///
/// Edges whose x-span contains `x` (inclusive) contribute the interpolated y;
/// a vertical edge lying on `x` contributes both endpoint ys.
pub fn intersections_at_x(x: f64, poly: &[Point], cfg: GeomCfg) -> Vec<f64> {
    let n = poly.len();
    let mut ys: Vec<f64> = Vec::new();
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let straddles = (a.x <= x && b.x >= x) || (b.x <= x && a.x >= x);
        if !straddles {
            continue;
        }
        let dx = b.x - a.x;
        if dx.abs() < cfg.eps_denom {
            ys.push(a.y);
            ys.push(b.y);
        } else {
            let t = (x - a.x) / dx;
            if (-cfg.eps_side..=1.0 + cfg.eps_side).contains(&t) {
                ys.push(a.y + t * (b.y - a.y));
            }
        }
    }
    ys.sort_by(f64::total_cmp);
    ys.dedup_by(|cur, prev| (*cur - *prev).abs() <= cfg.eps_dup);
    ys
}

/// Inner segments of the cut line at `x`: consecutive intersection pairs
/// `(y_enter, y_exit)`. An odd trailing intersection (tangency) is dropped.
pub fn cut_segments(x: f64, poly: &[Point], cfg: GeomCfg) -> Vec<(f64, f64)> {
    intersections_at_x(x, poly, cfg)
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// True if the line `x` actually passes through the polygon (at least 2 intersections).
#[inline]
pub fn crosses_at_x(x: f64, poly: &[Point], cfg: GeomCfg) -> bool {
    intersections_at_x(x, poly, cfg).len() >= 2
}
