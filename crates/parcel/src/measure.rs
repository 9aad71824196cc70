//! Distance between two boundary points, measured along the boundary.
//!
//! Both points are snapped onto the ring, then the ring is walked forward
//! (increasing edge index) and backward; the shorter walk wins. Points on the
//! same edge are joined directly.

use std::fmt;

use serde::Serialize;

use crate::boundary::Boundary;
use crate::geom2::{closest_edge, GeomCfg, Point};
use crate::units::{meters_to_unit, Calibration, LengthUnit, PIXEL_LENGTH_LABEL};

/// Walking direction around the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Increasing vertex index.
    Forward,
    /// Decreasing vertex index.
    Backward,
}

/// Vertex path from `start` (on edge `start_edge`) to `end` (on edge
/// `end_edge`) following the ring in `dir`. Edge `i` joins `poly[i]` and `poly[i+1]`.
pub fn build_boundary_path(
    poly: &[Point],
    start: Point,
    end: Point,
    start_edge: usize,
    end_edge: usize,
    dir: Direction,
) -> Vec<Point> {
    let n = poly.len();
    let mut path = vec![start];
    if start_edge == end_edge || n == 0 {
        path.push(end);
        return path;
    }
    match dir {
        Direction::Forward => {
            // poly[start_edge+1] ..= poly[end_edge]
            let mut idx = start_edge;
            loop {
                idx = (idx + 1) % n;
                path.push(poly[idx]);
                if idx == end_edge % n {
                    break;
                }
            }
        }
        Direction::Backward => {
            // poly[start_edge] down to poly[end_edge+1]
            let stop = (end_edge + 1) % n;
            let mut idx = start_edge % n;
            loop {
                path.push(poly[idx]);
                if idx == stop {
                    break;
                }
                idx = (idx + n - 1) % n;
            }
        }
    }
    path.push(end);
    path
}

/// Sum of segment lengths along `path`.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

/// Shorter of the forward and backward boundary walks between `a` and `b`
/// (both snapped to the boundary first). Ties prefer the forward walk.
/// Empty for an empty polygon.
pub fn shortest_boundary_path(poly: &[Point], a: Point, b: Point, cfg: GeomCfg) -> Vec<Point> {
    let (Some((ia, pa)), Some((ib, pb))) = (closest_edge(poly, a, cfg), closest_edge(poly, b, cfg))
    else {
        return Vec::new();
    };
    let forward = build_boundary_path(poly, pa, pb, ia, ib, Direction::Forward);
    let backward = build_boundary_path(poly, pa, pb, ia, ib, Direction::Backward);
    if path_length(&forward) <= path_length(&backward) {
        forward
    } else {
        backward
    }
}

/// A boundary distance with the path it follows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measurement {
    /// Snapped endpoints and intermediate vertices, in boundary coordinates.
    pub path: Vec<[f64; 2]>,
    /// Length in boundary units (px, or m for geo boundaries).
    pub raw: f64,
    /// Length in `unit`, or raw px when uncalibrated.
    pub value: f64,
    /// None when no calibration is available ("no scale").
    pub unit: Option<LengthUnit>,
}

impl Measurement {
    #[inline]
    pub fn is_scaled(&self) -> bool {
        self.unit.is_some()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{:.3} {}", self.value, unit),
            None => write!(f, "{:.3} {} (no scale)", self.value, PIXEL_LENGTH_LABEL),
        }
    }
}

/// Measure the along-boundary distance between `a` and `b`.
pub fn measure_distance(
    boundary: &Boundary,
    a: Point,
    b: Point,
    calibration: Calibration,
    unit: LengthUnit,
    cfg: GeomCfg,
) -> Measurement {
    let path = shortest_boundary_path(boundary.points(), a, b, cfg);
    let raw = path_length(&path);
    let (value, unit) = match calibration.length_m(raw) {
        Some(m) => (meters_to_unit(m, unit), Some(unit)),
        None => (raw, None),
    };
    Measurement {
        path: path.iter().map(|p| [p.x, p.y]).collect(),
        raw,
        value,
        unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn opposite_sides_follow_the_boundary() {
        let cfg = GeomCfg::default();
        let sq = square();
        // Bottom edge at x=2, top edge at x=3: left walk 2+10+3, right walk 8+10+7.
        let path = shortest_boundary_path(&sq, Point::new(2.0, -1.0), Point::new(3.0, 10.5), cfg);
        assert!((path_length(&path) - 15.0).abs() < 1e-12);
        assert_eq!(
            path,
            vec![
                Point::new(2.0, 0.0),
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(3.0, 10.0),
            ]
        );
        // Never the 10-unit chord.
        assert!(path_length(&path) > 10.0 + 1e-9);
    }

    #[test]
    fn forward_and_backward_walks() {
        let sq = square();
        let a = Point::new(5.0, 10.0); // edge 2
        let b = Point::new(5.0, 0.0); // edge 0
        let fwd = build_boundary_path(&sq, a, b, 2, 0, Direction::Forward);
        assert_eq!(fwd, vec![a, sq[3], sq[0], b]);
        let bwd = build_boundary_path(&sq, a, b, 2, 0, Direction::Backward);
        assert_eq!(bwd, vec![a, sq[2], sq[1], b]);
        assert_eq!(path_length(&fwd), path_length(&bwd));
    }

    #[test]
    fn same_edge_is_direct() {
        let sq = square();
        let a = Point::new(1.0, 0.0);
        let b = Point::new(9.0, 0.0);
        for dir in [Direction::Forward, Direction::Backward] {
            assert_eq!(build_boundary_path(&sq, a, b, 0, 0, dir), vec![a, b]);
        }
        let path = shortest_boundary_path(&sq, a, b, GeomCfg::default());
        assert!((path_length(&path) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn units_follow_calibration() {
        let b = Boundary::from_points(square()).unwrap();
        let cfg = GeomCfg::default();
        let (a, c) = (Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        let raw = measure_distance(&b, a, c, Calibration::Uncalibrated, LengthUnit::Ft, cfg);
        assert!((raw.value - 20.0).abs() < 1e-12);
        assert!(!raw.is_scaled());
        assert_eq!(raw.to_string(), "20.000 px (no scale)");

        let cal = Calibration::Scaled {
            meters_per_pixel: 0.3048,
        };
        let ft = measure_distance(&b, a, c, cal, LengthUnit::Ft, cfg);
        assert!((ft.value - 20.0).abs() < 1e-9);
        assert!((ft.raw - 20.0).abs() < 1e-12);
        assert_eq!(ft.to_string(), "20.000 ft");

        let metric = measure_distance(&b, a, c, Calibration::Metric, LengthUnit::Km, cfg);
        assert!((metric.value - 0.02).abs() < 1e-12);
    }

    #[test]
    fn empty_polygon_measures_zero() {
        assert!(shortest_boundary_path(&[], Point::zeros(), Point::zeros(), GeomCfg::default())
            .is_empty());
        assert_eq!(path_length(&[]), 0.0);
    }
}
