//! Shoelace area, centroid and x-extent of implicitly closed polygons.

use super::types::Point;

/// Signed shoelace area: positive for counter-clockwise vertex order
/// (y up), negative for clockwise. Zero for fewer than 3 vertices.
pub fn signed_area(poly: &[Point]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let n = poly.len();
    let mut a = 0.0;
    for i in 0..n {
        let p = poly[i];
        let q = poly[(i + 1) % n];
        a += p.x * q.y - q.x * p.y;
    }
    a * 0.5
}

/// Enclosed area, independent of winding order.
#[inline]
pub fn polygon_area(poly: &[Point]) -> f64 {
    signed_area(poly).abs()
}

/// Area centroid. None for fewer than 3 vertices or (near) zero area.
pub fn centroid(poly: &[Point]) -> Option<Point> {
    if poly.len() < 3 {
        return None;
    }
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..poly.len() {
        let p = poly[i];
        let q = poly[(i + 1) % poly.len()];
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    a *= 0.5;
    if a.abs() < 1e-18 {
        return None;
    }
    Some(Point::new(cx / (6.0 * a), cy / (6.0 * a)))
}

/// `(min_x, max_x)` over all vertices. None for an empty slice.
pub fn x_extent(poly: &[Point]) -> Option<(f64, f64)> {
    let first = poly.first()?;
    Some(
        poly.iter()
            .fold((first.x, first.x), |(lo, hi), p| (lo.min(p.x), hi.max(p.x))),
    )
}

/// Total edge length of the closed ring.
pub fn perimeter(poly: &[Point]) -> f64 {
    if poly.len() < 2 {
        return 0.0;
    }
    (0..poly.len())
        .map(|i| (poly[(i + 1) % poly.len()] - poly[i]).norm())
        .sum()
}
