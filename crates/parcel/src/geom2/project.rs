//! Point-to-segment and point-to-boundary projection.

use super::types::{GeomCfg, Point};

/// Closest point to `p` on segment `[a, b]` (clamped parameter `t ∈ [0, 1]`).
/// A degenerate segment returns `a`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point, cfg: GeomCfg) -> Point {
    let d = b - a;
    if d.x.abs() < cfg.eps_denom && d.y.abs() < cfg.eps_denom {
        return a;
    }
    let t = (p - a).dot(&d) / d.norm_squared();
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a + d * t
    }
}

/// Index `i` of the edge `poly[i] → poly[i+1]` closest to `p`, with the
/// projected point. Ties keep the lower index. None for an empty polygon.
pub fn closest_edge(poly: &[Point], p: Point, cfg: GeomCfg) -> Option<(usize, Point)> {
    let n = poly.len();
    let mut best: Option<(usize, Point, f64)> = None;
    for i in 0..n {
        let proj = closest_point_on_segment(p, poly[i], poly[(i + 1) % n], cfg);
        let d = (proj - p).norm();
        if best.as_ref().is_none_or(|(_, _, bd)| d < *bd) {
            best = Some((i, proj, d));
        }
    }
    best.map(|(i, proj, _)| (i, proj))
}

/// Closest point on the closed boundary of `poly`.
#[inline]
pub fn closest_point_on_boundary(p: Point, poly: &[Point], cfg: GeomCfg) -> Option<Point> {
    closest_edge(poly, p, cfg).map(|(_, q)| q)
}

/// Index of the edge closest to `p`.
#[inline]
pub fn closest_segment_index(poly: &[Point], p: Point, cfg: GeomCfg) -> Option<usize> {
    closest_edge(poly, p, cfg).map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_projection_clamps() {
        let cfg = GeomCfg::default();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(
            closest_point_on_segment(Point::new(3.0, 5.0), a, b, cfg),
            Point::new(3.0, 0.0)
        );
        assert_eq!(closest_point_on_segment(Point::new(-4.0, 1.0), a, b, cfg), a);
        assert_eq!(closest_point_on_segment(Point::new(14.0, -1.0), a, b, cfg), b);
        assert_eq!(closest_point_on_segment(Point::new(1.0, 1.0), a, a, cfg), a);
    }

    #[test]
    fn boundary_projection_picks_nearest_edge() {
        let cfg = GeomCfg::default();
        let sq = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let p = Point::new(9.0, 4.0);
        assert_eq!(closest_point_on_boundary(p, &sq, cfg), Some(Point::new(10.0, 4.0)));
        assert_eq!(closest_segment_index(&sq, p, cfg), Some(1));
        assert_eq!(closest_segment_index(&sq, Point::new(5.0, 11.0), cfg), Some(2));
        assert_eq!(closest_point_on_boundary(p, &[], cfg), None);
    }
}
