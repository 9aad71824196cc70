//! Basic 2D types and tolerances used by the polygon kernel.
//!
//! - `Point`: planar coordinate (pixels, or local meters for geo boundaries).
//! - `GeomCfg`: centralizes epsilons for side tests, divisions and dedup.
//! - `Side`: which half-plane a vertical clip keeps.
//! - `BBox2`: axis-aligned bounding box.

use nalgebra::Vector2;

/// Planar coordinate. Unit-agnostic.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Slack for half-plane membership (`x <= c + eps_side`).
    pub eps_side: f64,
    /// Denominators (edge Δx, segment length²) at or below this are degenerate.
    pub eps_denom: f64,
    /// Output vertices / scan ys closer than this are collapsed.
    pub eps_dup: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_side: 1e-9,
            eps_denom: 1e-12,
            eps_dup: 1e-6,
        }
    }
}

/// Half-plane kept by `clip_vertical`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// `x <= cut`
    Left,
    /// `x >= cut`
    Right,
}

impl Side {
    #[inline]
    pub fn contains(self, x: f64, cut: f64, eps: f64) -> bool {
        match self {
            Side::Left => x <= cut + eps,
            Side::Right => x >= cut - eps,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox2 {
    pub min: Point,
    pub max: Point,
}

impl BBox2 {
    /// None for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let mut bb = BBox2 {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            bb.min.x = bb.min.x.min(p.x);
            bb.min.y = bb.min.y.min(p.y);
            bb.max.x = bb.max.x.max(p.x);
            bb.max.y = bb.max.y.max(p.y);
        }
        Some(bb)
    }
    #[inline]
    pub fn center(&self) -> Point {
        (self.min + self.max) * 0.5
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
