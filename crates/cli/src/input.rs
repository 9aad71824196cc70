use anyhow::{bail, Context, Result};
use parcel::api::{LatLng, Point};
use polars::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Boundary vertices as read from disk, before finalization.
#[derive(Clone, Debug, PartialEq)]
pub enum ParcelInput {
    /// Image coordinates (pixels).
    Traced(Vec<Point>),
    /// Map vertices in degrees.
    Geo(Vec<LatLng>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoundaryFile {
    #[serde(default)]
    points: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    lat_lngs: Option<Vec<[f64; 2]>>,
}

/// Load `path` as CSV (by extension) or JSON.
pub fn load(path: &Path) -> Result<ParcelInput> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
            .collect()
            .with_context(|| format!("reading {}", path.display()))?;
        tracing::info!(rows = df.height(), cols = df.width(), "input_csv_shape");
        from_frame(&df).with_context(|| format!("parsing {}", path.display()))
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        parse_json(&bytes).with_context(|| format!("parsing {}", path.display()))
    }
}

/// `{"points": [[x, y], ...]}` or `{"lat_lngs": [[lat, lng], ...]}`.
pub fn parse_json(bytes: &[u8]) -> Result<ParcelInput> {
    let file: BoundaryFile = serde_json::from_slice(bytes)?;
    match (file.points, file.lat_lngs) {
        (Some(points), None) => Ok(ParcelInput::Traced(
            points.into_iter().map(|[x, y]| Point::new(x, y)).collect(),
        )),
        (None, Some(lat_lngs)) => Ok(ParcelInput::Geo(
            lat_lngs
                .into_iter()
                .map(|[lat, lng]| LatLng::new(lat, lng))
                .collect(),
        )),
        (Some(_), Some(_)) => bail!("boundary has both `points` and `lat_lngs`"),
        (None, None) => bail!("boundary needs `points` or `lat_lngs`"),
    }
}

/// Columns `lat,lng` (geo) take precedence over `x,y` (traced).
pub fn from_frame(df: &DataFrame) -> Result<ParcelInput> {
    let has = |name: &str| df.get_column_index(name).is_some();
    if has("lat") && has("lng") {
        let lat = f64_column(df, "lat")?;
        let lng = f64_column(df, "lng")?;
        Ok(ParcelInput::Geo(
            lat.into_iter()
                .zip(lng)
                .map(|(lat, lng)| LatLng::new(lat, lng))
                .collect(),
        ))
    } else if has("x") && has("y") {
        let xs = f64_column(df, "x")?;
        let ys = f64_column(df, "y")?;
        Ok(ParcelInput::Traced(
            xs.into_iter().zip(ys).map(|(x, y)| Point::new(x, y)).collect(),
        ))
    } else {
        bail!("expected columns x,y or lat,lng")
    }
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df.column(name)?.cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("row {}: missing `{name}`", row + 1)))
        .collect()
}
