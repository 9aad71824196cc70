//! Latitude/longitude → local planar meters (equirectangular approximation).
//!
//! The first vertex is the projection origin; the output is recentred on its
//! bounding-box midpoint. Valid for parcels small relative to the Earth
//! (tens of km at most); accuracy degrades for larger extents and near the poles.

use serde::{Deserialize, Serialize};

use crate::boundary::{Boundary, Provenance};
use crate::error::{ParcelError, Result};
use crate::geom2::{BBox2, Point};

/// Equatorial Earth radius (WGS84), meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Geographic vertex in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Local planar frame fixed by a vertex list: origin at the first vertex,
/// recentred on the projected bounding-box midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    lat0: f64,
    lng0: f64,
    cos0: f64,
    center: Point,
}

impl LocalFrame {
    /// None for an empty vertex list.
    pub fn from_lat_lngs(lat_lngs: &[LatLng]) -> Option<Self> {
        let origin = lat_lngs.first()?;
        let mut frame = Self {
            lat0: origin.lat.to_radians(),
            lng0: origin.lng.to_radians(),
            cos0: origin.lat.to_radians().cos(),
            center: Point::zeros(),
        };
        let raw: Vec<Point> = lat_lngs.iter().map(|&ll| frame.offset(ll)).collect();
        if let Some(bb) = BBox2::from_points(&raw) {
            frame.center = bb.center();
        }
        Some(frame)
    }

    /// `x = R·Δλ·cos φ0`, `y = R·Δφ` relative to the origin vertex.
    #[inline]
    fn offset(&self, ll: LatLng) -> Point {
        let d_lat = ll.lat.to_radians() - self.lat0;
        let d_lng = ll.lng.to_radians() - self.lng0;
        Point::new(EARTH_RADIUS_M * d_lng * self.cos0, EARTH_RADIUS_M * d_lat)
    }

    /// Any lat/lng (not only frame vertices) in local meters.
    #[inline]
    pub fn project(&self, ll: LatLng) -> Point {
        self.offset(ll) - self.center
    }
}

/// Project to local meters in the frame the vertices define.
/// Empty input yields an empty vec.
pub fn project_to_local_meters(lat_lngs: &[LatLng]) -> Vec<Point> {
    match LocalFrame::from_lat_lngs(lat_lngs) {
        Some(frame) => lat_lngs.iter().map(|&ll| frame.project(ll)).collect(),
        None => Vec::new(),
    }
}

/// Finalize a map-drawn boundary. The result is in meters and keeps the
/// original vertices for reporting.
pub fn project_geo_boundary(lat_lngs: &[LatLng]) -> Result<Boundary> {
    if lat_lngs.len() < 3 {
        return Err(ParcelError::InsufficientVertices {
            got: lat_lngs.len(),
        });
    }
    let points = project_to_local_meters(lat_lngs);
    Boundary::with_provenance(
        points,
        Provenance::Geo {
            lat_lngs: lat_lngs.to_vec(),
        },
    )
}
