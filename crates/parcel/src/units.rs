//! Units and scale calibration.
//!
//! - `LengthUnit`, `AreaUnit`: fixed conversion tables to/from meters.
//! - `compute_scale`: meters-per-pixel from a reference length laid along the
//!   boundary's first edge.
//! - `Calibration`: how raw boundary units map to meters (geo, scaled, none).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::error::{ParcelError, Result};
use crate::geom2::Point;

const FT_M: f64 = 0.3048;
const IN_M: f64 = 0.0254;
const KM_M: f64 = 1000.0;
const MI_M: f64 = 1609.344;

const FT2_M2: f64 = 0.092_903_04;
const IN2_M2: f64 = 0.000_645_16;
const ACRE_M2: f64 = 4_046.856_422_4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    M,
    Ft,
    In,
    Km,
    Mi,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 5] = [
        LengthUnit::M,
        LengthUnit::Ft,
        LengthUnit::In,
        LengthUnit::Km,
        LengthUnit::Mi,
    ];

    #[inline]
    pub fn meters_per_unit(self) -> f64 {
        match self {
            LengthUnit::M => 1.0,
            LengthUnit::Ft => FT_M,
            LengthUnit::In => IN_M,
            LengthUnit::Km => KM_M,
            LengthUnit::Mi => MI_M,
        }
    }

    #[inline]
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::M => "m",
            LengthUnit::Ft => "ft",
            LengthUnit::In => "in",
            LengthUnit::Km => "km",
            LengthUnit::Mi => "mi",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = ParcelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::M),
            "ft" | "foot" | "feet" => Ok(LengthUnit::Ft),
            "in" | "inch" | "inches" => Ok(LengthUnit::In),
            "km" | "kilometer" | "kilometers" => Ok(LengthUnit::Km),
            "mi" | "mile" | "miles" => Ok(LengthUnit::Mi),
            _ => Err(ParcelError::UnknownUnit(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUnit {
    #[default]
    #[serde(rename = "m2", alias = "m")]
    M2,
    #[serde(rename = "ft2", alias = "ft")]
    Ft2,
    #[serde(rename = "in2", alias = "in")]
    In2,
    #[serde(rename = "acre", alias = "acres")]
    Acre,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 4] = [AreaUnit::M2, AreaUnit::Ft2, AreaUnit::In2, AreaUnit::Acre];

    #[inline]
    pub fn square_meters_per_unit(self) -> f64 {
        match self {
            AreaUnit::M2 => 1.0,
            AreaUnit::Ft2 => FT2_M2,
            AreaUnit::In2 => IN2_M2,
            AreaUnit::Acre => ACRE_M2,
        }
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            AreaUnit::M2 => "m²",
            AreaUnit::Ft2 => "ft²",
            AreaUnit::In2 => "in²",
            AreaUnit::Acre => "acres",
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AreaUnit {
    type Err = ParcelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "m2" | "m²" | "sqm" => Ok(AreaUnit::M2),
            "ft" | "ft2" | "ft²" | "sqft" => Ok(AreaUnit::Ft2),
            "in" | "in2" | "in²" | "sqin" => Ok(AreaUnit::In2),
            "acre" | "acres" | "ac" => Ok(AreaUnit::Acre),
            _ => Err(ParcelError::UnknownUnit(s.to_string())),
        }
    }
}

/// Label used for raw pixel areas when no calibration is available.
pub const PIXEL_AREA_LABEL: &str = "px²";
/// Label used for raw pixel lengths when no calibration is available.
pub const PIXEL_LENGTH_LABEL: &str = "px";

/// A magnitude with its display label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AreaValue {
    pub value: f64,
    pub label: &'static str,
}

impl fmt::Display for AreaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} {}", self.value, self.label)
    }
}

#[inline]
pub fn length_to_meters(length: f64, unit: LengthUnit) -> f64 {
    length * unit.meters_per_unit()
}

#[inline]
pub fn meters_to_unit(meters: f64, unit: LengthUnit) -> f64 {
    meters / unit.meters_per_unit()
}

#[inline]
pub fn area_to_unit(area_m2: f64, unit: AreaUnit) -> AreaValue {
    AreaValue {
        value: area_m2 / unit.square_meters_per_unit(),
        label: unit.label(),
    }
}

/// Meters per pixel from a reference length along the first edge of `poly`.
///
/// Fails with `InvalidReference` when the reference is missing, non-finite or
/// not positive, or when the first edge has no length.
pub fn try_compute_scale(poly: &[Point], reference: Option<f64>, unit: LengthUnit) -> Result<f64> {
    if poly.len() < 2 {
        return Err(ParcelError::InsufficientVertices { got: poly.len() });
    }
    let value = reference
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(ParcelError::InvalidReference)?;
    let pixels = (poly[1] - poly[0]).norm();
    if pixels.is_nan() || pixels <= 0.0 {
        return Err(ParcelError::InvalidReference);
    }
    Ok(length_to_meters(value, unit) / pixels)
}

/// Like `try_compute_scale`, with every failure mapped to "no calibration".
#[inline]
pub fn compute_scale(poly: &[Point], reference: Option<f64>, unit: LengthUnit) -> Option<f64> {
    try_compute_scale(poly, reference, unit).ok()
}

/// How raw boundary units relate to meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Calibration {
    /// Boundary coordinates are already meters (geo provenance).
    Metric,
    /// Pixel boundary with a meters-per-pixel factor.
    Scaled { meters_per_pixel: f64 },
    /// No calibration: report raw pixel units.
    Uncalibrated,
}

impl Calibration {
    /// Geo provenance wins over any pixel scale.
    pub fn resolve(boundary: &Boundary, scale: Option<f64>) -> Self {
        if boundary.is_geo() {
            Calibration::Metric
        } else if let Some(s) = scale.filter(|s| s.is_finite() && *s > 0.0) {
            Calibration::Scaled {
                meters_per_pixel: s,
            }
        } else {
            Calibration::Uncalibrated
        }
    }

    #[inline]
    pub fn is_calibrated(self) -> bool {
        !matches!(self, Calibration::Uncalibrated)
    }

    /// Raw boundary length → meters. None when uncalibrated.
    #[inline]
    pub fn length_m(self, raw: f64) -> Option<f64> {
        match self {
            Calibration::Metric => Some(raw),
            Calibration::Scaled { meters_per_pixel } => Some(raw * meters_per_pixel),
            Calibration::Uncalibrated => None,
        }
    }

    /// Raw boundary area → square meters. None when uncalibrated.
    #[inline]
    pub fn area_m2(self, raw: f64) -> Option<f64> {
        match self {
            Calibration::Metric => Some(raw),
            Calibration::Scaled { meters_per_pixel } => {
                Some(raw * meters_per_pixel * meters_per_pixel)
            }
            Calibration::Uncalibrated => None,
        }
    }

    /// Raw area in the requested unit, or raw px² when uncalibrated.
    pub fn area_value(self, raw: f64, unit: AreaUnit) -> AreaValue {
        match self.area_m2(raw) {
            Some(m2) => area_to_unit(m2, unit),
            None => AreaValue {
                value: raw,
                label: PIXEL_AREA_LABEL,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_round_trip_all_units() {
        for unit in LengthUnit::ALL {
            for v in [0.001, 1.0, 12.5, 7_321.25] {
                let back = meters_to_unit(length_to_meters(v, unit), unit);
                assert!((back - v).abs() <= 1e-12 * v.max(1.0), "{unit}: {v} -> {back}");
            }
        }
    }

    #[test]
    fn area_table_constants() {
        assert_eq!(area_to_unit(1.0, AreaUnit::M2).value, 1.0);
        assert!((area_to_unit(1.0, AreaUnit::Ft2).value - 10.763_910_416_709_722).abs() < 1e-9);
        assert!((area_to_unit(1.0, AreaUnit::In2).value - 1_550.003_100_006_2).abs() < 1e-6);
        let acre = area_to_unit(4_046.856_422_4, AreaUnit::Acre);
        assert!((acre.value - 1.0).abs() < 1e-12);
        assert_eq!(acre.label, "acres");
    }

    #[test]
    fn parse_units() {
        assert_eq!("FT".parse::<LengthUnit>().unwrap(), LengthUnit::Ft);
        assert_eq!(" mi ".parse::<LengthUnit>().unwrap(), LengthUnit::Mi);
        assert_eq!("acres".parse::<AreaUnit>().unwrap(), AreaUnit::Acre);
        assert_eq!("m".parse::<AreaUnit>().unwrap(), AreaUnit::M2);
        assert_eq!(
            "furlong".parse::<LengthUnit>().unwrap_err(),
            ParcelError::UnknownUnit("furlong".into())
        );
    }

    #[test]
    fn scale_from_reference_edge() {
        let poly = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
        ];
        let s = compute_scale(&poly, Some(10.0), LengthUnit::M).unwrap();
        assert!((s - 0.1).abs() < 1e-15);
        // 50 px² band at 0.1 m/px → 0.5 m²
        let cal = Calibration::Scaled {
            meters_per_pixel: s,
        };
        assert!((cal.area_m2(50.0).unwrap() - 0.5).abs() < 1e-12);

        let s_ft = compute_scale(&poly, Some(10.0), LengthUnit::Ft).unwrap();
        assert!((s_ft - 0.03048).abs() < 1e-15);
    }

    #[test]
    fn invalid_reference_yields_none() {
        let poly = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        assert_eq!(compute_scale(&poly, None, LengthUnit::M), None);
        assert_eq!(compute_scale(&poly, Some(0.0), LengthUnit::M), None);
        assert_eq!(compute_scale(&poly, Some(-2.0), LengthUnit::M), None);
        assert_eq!(compute_scale(&poly, Some(f64::NAN), LengthUnit::M), None);
        assert_eq!(
            try_compute_scale(&poly, Some(f64::INFINITY), LengthUnit::M),
            Err(ParcelError::InvalidReference)
        );
        let collapsed = vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0)];
        assert_eq!(compute_scale(&collapsed, Some(5.0), LengthUnit::M), None);
        assert_eq!(
            try_compute_scale(&poly[..1], Some(5.0), LengthUnit::M),
            Err(ParcelError::InsufficientVertices { got: 1 })
        );
    }

    #[test]
    fn uncalibrated_reports_pixels() {
        let v = Calibration::Uncalibrated.area_value(42.0, AreaUnit::Acre);
        assert_eq!(v.value, 42.0);
        assert_eq!(v.label, PIXEL_AREA_LABEL);
        assert_eq!(Calibration::Uncalibrated.length_m(3.0), None);
        assert_eq!(Calibration::Metric.length_m(3.0), Some(3.0));
    }
}
