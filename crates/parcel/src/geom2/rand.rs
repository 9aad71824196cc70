//! Random parcel outlines in 2D (radial jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler for parcel-like polygons used by
//!   property tests and benchmarks. Draws are reproducible from a replay token.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter. Sorted angles give a simple star-shaped (possibly concave)
//!   ring; `draw_convex_parcel` takes its convex hull instead.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use super::area::centroid;
use super::types::{BBox2, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How many corners a sampled parcel gets. Real lots have 3 to a few dozen;
/// counts below 3 are raised to 3.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    /// Inclusive range; `max < min` collapses to `min`.
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    /// Inclusive `(lo, hi)` after the 3-vertex floor.
    fn range(self) -> (usize, usize) {
        match self {
            VertexCount::Fixed(n) => (n.max(3), n.max(3)),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                (lo, max.max(lo))
            }
        }
    }

    fn sample(self, rng: &mut StdRng) -> usize {
        let (lo, hi) = self.range();
        if lo == hi {
            lo
        } else {
            rng.gen_range(lo..=hi)
        }
    }
}

/// Shape of sampled parcels.
///
/// Vertices sit at jittered angles around the origin with jittered radii, so
/// every draw is star-shaped about the origin and therefore simple: a valid
/// boundary with no self-intersection repair needed. Radial jitter produces
/// the shallow concavities of surveyed lots.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Fraction of the corner spacing `2π/n` a corner may drift; capped at 0.49
    /// so corners never swap order.
    pub angle_jitter_frac: f64,
    /// Relative radius spread: radius = `base_radius·(1 + u)`, `|u| ≤ radial_jitter`.
    pub radial_jitter: f64,
    /// Nominal parcel radius. The default of 100 reads as pixels of a traced
    /// image (a parcel about 200 px across).
    pub base_radius: f64,
    /// Rotate the whole parcel by a random angle; off gives a corner on the +x axis.
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 100.0,
            random_phase: true,
        }
    }
}

/// `(seed, index)` pair naming one parcel draw. The same token always yields
/// the same parcel; tests and benches walk `index` for a family of parcels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    /// Token for the next parcel in the same family.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }

    fn rng(self) -> StdRng {
        let key = splitmix64(self.seed ^ splitmix64(self.index.wrapping_add(GOLDEN_GAMMA)));
        StdRng::seed_from_u64(key)
    }
}

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 finalizer; decorrelates neighbouring seeds and indices.
fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Draw a star-shaped parcel ring (counter-clockwise, no closing duplicate).
pub fn draw_parcel_radial(cfg: RadialCfg, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.max(0.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let base = phase + (k as f64) * delta;
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            base + jitter
        })
        .collect();
    angles.sort_by(f64::total_cmp);
    angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u).max(1e-6) * r0;
            Point::new(th.cos() * r, th.sin() * r)
        })
        .collect()
}

/// Draw a convex parcel: convex hull of a radial draw. None if the hull degenerates.
pub fn draw_convex_parcel(cfg: RadialCfg, tok: ReplayToken) -> Option<Vec<Point>> {
    let hull = convex_hull(&draw_parcel_radial(cfg, tok))?;
    (hull.len() >= 3).then_some(hull)
}

/// Translate the area centroid to the origin and scale uniformly so the
/// larger bounding-box side equals `span`.
pub fn recenter_rescale(poly: &[Point], span: f64) -> Option<Vec<Point>> {
    let c = centroid(poly)?;
    let bb = BBox2::from_points(poly)?;
    let extent = bb.width().max(bb.height());
    if !(extent.is_finite()) || extent <= 0.0 || span <= 0.0 {
        return None;
    }
    let s = span / extent;
    Some(poly.iter().map(|p| (p - c) * s).collect())
}

/// Andrew’s monotone chain convex hull (returns hull in CCW order).
pub fn convex_hull(points: &[Point]) -> Option<Vec<Point>> {
    if points.len() < 2 {
        return None;
    }
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 2 {
        return None;
    }
    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    Some(hull)
}

#[inline]
fn cross(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
