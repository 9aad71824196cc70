//! Half-plane clipping against a vertical line (one Sutherland–Hodgman pass).

use super::types::{GeomCfg, Point, Side};

/// Intersect `poly` with `{x <= cut_x}` (`Side::Left`) or `{x >= cut_x}` (`Side::Right`).
///
/// Each edge `a → b` is classified by its endpoints; crossing edges contribute
/// the interpolated point on `x = cut_x`. Consecutive output vertices closer
/// than `cfg.eps_dup` are collapsed, including the wrap-around pair.
/// Returns an empty vec if the input or the result has fewer than 3 vertices.
pub fn clip_vertical(poly: &[Point], cut_x: f64, side: Side, cfg: GeomCfg) -> Vec<Point> {
    if poly.len() < 3 {
        return Vec::new();
    }
    let n = poly.len();
    let mut out: Vec<Point> = Vec::with_capacity(n + 2);
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let a_in = side.contains(a.x, cut_x, cfg.eps_side);
        let b_in = side.contains(b.x, cut_x, cfg.eps_side);
        match (a_in, b_in) {
            (true, true) => out.push(b),
            (true, false) => {
                if let Some(p) = crossing(a, b, cut_x, cfg) {
                    out.push(p);
                }
            }
            (false, true) => {
                if let Some(p) = crossing(a, b, cut_x, cfg) {
                    out.push(p);
                }
                out.push(b);
            }
            (false, false) => {}
        }
    }
    out.dedup_by(|cur, prev| (*cur - *prev).norm() <= cfg.eps_dup);
    while out.len() > 1 && (out[out.len() - 1] - out[0]).norm() <= cfg.eps_dup {
        out.pop();
    }
    if out.len() < 3 {
        out.clear();
    }
    out
}

#[inline]
fn crossing(a: Point, b: Point, cut_x: f64, cfg: GeomCfg) -> Option<Point> {
    let dx = b.x - a.x;
    if dx.abs() <= cfg.eps_denom {
        return None;
    }
    let t = (cut_x - a.x) / dx;
    Some(Point::new(cut_x, a.y + t * (b.y - a.y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::polygon_area;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn clip_square_in_half() {
        let cfg = GeomCfg::default();
        let left = clip_vertical(&square(), 4.0, Side::Left, cfg);
        let right = clip_vertical(&square(), 4.0, Side::Right, cfg);
        assert!((polygon_area(&left) - 40.0).abs() < 1e-12);
        assert!((polygon_area(&right) - 60.0).abs() < 1e-12);
        assert!(left.iter().all(|p| p.x <= 4.0 + 1e-12));
        assert!(right.iter().all(|p| p.x >= 4.0 - 1e-12));
    }

    #[test]
    fn clip_outside_extent_is_all_or_nothing() {
        let cfg = GeomCfg::default();
        assert!(clip_vertical(&square(), -1.0, Side::Left, cfg).is_empty());
        let all = clip_vertical(&square(), 11.0, Side::Left, cfg);
        assert!((polygon_area(&all) - 100.0).abs() < 1e-12);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn clip_at_vertex_collapses_duplicates() {
        // Cutting exactly through the apex must not leave repeated vertices.
        let tri = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ];
        let left = clip_vertical(&tri, 5.0, Side::Left, GeomCfg::default());
        for i in 0..left.len() {
            let j = (i + 1) % left.len();
            assert!((left[i] - left[j]).norm() > 1e-6);
        }
        assert!((polygon_area(&left) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_input_yields_empty() {
        let seg = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(clip_vertical(&seg, 0.5, Side::Left, GeomCfg::default()).is_empty());
    }
}
