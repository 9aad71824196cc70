mod input;
mod provenance;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use input::ParcelInput;
use parcel::api::{AreaTable, AreaUnit, LatLng, LengthUnit, LocalFrame, Point, Report, Session};
use polars::prelude::*;
use provenance::Payload;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "parcel")]
#[command(about = "Split land parcels into equal-area bands")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Args)]
struct InputArgs {
    /// Boundary file: JSON (`points` or `lat_lngs`) or CSV (`x,y` or `lat,lng`)
    #[arg(long)]
    input: PathBuf,
    /// Real length of the first boundary edge (traced boundaries only)
    #[arg(long)]
    ref_length: Option<f64>,
    /// Unit of --ref-length and of reported lengths
    #[arg(long, default_value = "m")]
    length_unit: LengthUnit,
}

#[derive(Subcommand)]
enum Action {
    /// Generate equal-area cuts and report the bands
    Partition {
        #[command(flatten)]
        input: InputArgs,
        /// Number of partitions
        #[arg(short = 'n', long, default_value_t = 2)]
        n: usize,
        #[arg(long, default_value = "m2")]
        area_unit: AreaUnit,
        /// Write the report as JSON (plus a provenance sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write the area table as CSV (plus a provenance sidecar)
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Distance along the boundary between two points (x,y; lat,lng for geo input)
    Measure {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_parser = parse_pair)]
        from: [f64; 2],
        #[arg(long, value_parser = parse_pair)]
        to: [f64; 2],
    },
    /// Print the total boundary area
    Area {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, default_value = "m2")]
        area_unit: AreaUnit,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Partition {
            input,
            n,
            area_unit,
            out,
            table,
        } => partition(&input, n, area_unit, out, table),
        Action::Measure { input, from, to } => measure(&input, from, to),
        Action::Area { input, area_unit } => area(&input, area_unit),
        Action::Report => report(),
    }
}

/// Load the boundary, set the reference and finalize.
fn open_session(args: &InputArgs) -> Result<(Session, ParcelInput)> {
    let parcel = input::load(&args.input)?;
    let mut session = Session::default();
    session.set_reference(args.ref_length, args.length_unit);
    match &parcel {
        ParcelInput::Traced(points) => session.finalize_boundary(points.clone()),
        ParcelInput::Geo(lat_lngs) => session.finalize_geo(lat_lngs),
    }
    .with_context(|| format!("finalizing boundary from {}", args.input.display()))?;
    let traced = matches!(parcel, ParcelInput::Traced(_));
    if traced && args.ref_length.is_some() && session.scale().is_none() {
        tracing::warn!("reference length unusable; areas stay in px²");
    }
    Ok((session, parcel))
}

fn partition(
    args: &InputArgs,
    n: usize,
    area_unit: AreaUnit,
    out: Option<PathBuf>,
    table: Option<PathBuf>,
) -> Result<()> {
    tracing::info!(input = %args.input.display(), n, "partition");
    let (mut session, _) = open_session(args)?;
    session.generate(n)?;
    let report = Report::from_session(&session, area_unit, args.length_unit, now_unix_ms())?;
    print!("{report}");

    let params = serde_json::json!({
        "input": args.input.to_string_lossy(),
        "n": n,
        "ref_length": args.ref_length,
        "length_unit": args.length_unit,
        "area_unit": area_unit,
    });
    if let Some(out) = out {
        create_parent(&out)?;
        fs::write(&out, report.to_json_pretty()?)
            .with_context(|| format!("writing {}", out.display()))?;
        provenance::write_sidecar(&out, Payload::new("partition", params.clone()))?;
    }
    if let Some(path) = table {
        write_area_table(&path, &session.area_table(area_unit)?)?;
        provenance::write_sidecar(&path, Payload::new("partition", params))?;
    }
    Ok(())
}

fn measure(args: &InputArgs, from: [f64; 2], to: [f64; 2]) -> Result<()> {
    let (mut session, parcel) = open_session(args)?;
    let a = to_local(&parcel, from)?;
    let b = to_local(&parcel, to)?;
    let m = session.measure(a, b, args.length_unit)?;
    println!("{m}");
    Ok(())
}

fn area(args: &InputArgs, area_unit: AreaUnit) -> Result<()> {
    let (session, _) = open_session(args)?;
    let table = session.area_table(area_unit)?;
    let suffix = if table.calibrated { "" } else { " (no scale)" };
    println!("{}{suffix}", table.total);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "parcel_version": parcel::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Geo input points are lat,lng and are projected in the boundary's own frame.
fn to_local(parcel: &ParcelInput, [u, v]: [f64; 2]) -> Result<Point> {
    match parcel {
        ParcelInput::Traced(_) => Ok(Point::new(u, v)),
        ParcelInput::Geo(lat_lngs) => {
            let frame = LocalFrame::from_lat_lngs(lat_lngs).context("empty geo boundary")?;
            Ok(frame.project(LatLng::new(u, v)))
        }
    }
}

fn parse_pair(s: &str) -> std::result::Result<[f64; 2], String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `a,b`, got `{s}`"))?;
    let parse = |t: &str| {
        t.trim()
            .parse::<f64>()
            .map_err(|e| format!("`{t}`: {e}"))
    };
    Ok([parse(a)?, parse(b)?])
}

fn write_area_table(path: &Path, table: &AreaTable) -> Result<()> {
    let rows = &table.rows;
    let mut df = df!(
        "label" => rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
        "x_from" => rows.iter().map(|r| r.x_from).collect::<Vec<_>>(),
        "x_to" => rows.iter().map(|r| r.x_to).collect::<Vec<_>>(),
        "raw" => rows.iter().map(|r| r.raw).collect::<Vec<_>>(),
        "area" => rows.iter().map(|r| r.area.value).collect::<Vec<_>>(),
        "unit" => rows.iter().map(|r| r.area.label).collect::<Vec<_>>(),
    )?;
    create_parent(path)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(rows = df.height(), path = %path.display(), "area_table_written");
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(input: PathBuf, ref_length: Option<f64>) -> InputArgs {
        InputArgs {
            input,
            ref_length,
            length_unit: LengthUnit::M,
        }
    }

    #[test]
    fn pairs() {
        assert_eq!(parse_pair("1.5, -2").unwrap(), [1.5, -2.0]);
        assert!(parse_pair("1.5").is_err());
        assert!(parse_pair("a,2").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
        let cmd = Cmd::try_parse_from([
            "parcel", "partition", "--input", "p.json", "-n", "4", "--area-unit", "acre",
        ])
        .unwrap();
        assert!(matches!(cmd.action, Action::Partition { n: 4, area_unit: AreaUnit::Acre, .. }));
        assert!(Cmd::try_parse_from(["parcel", "area", "--input", "p.json", "--length-unit", "yd"])
            .is_err());
    }

    #[test]
    fn partition_writes_report_table_and_sidecars() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lot.json");
        fs::write(&input, r#"{"points": [[0,0],[100,0],[100,40],[0,40]]}"#).unwrap();
        let out = dir.path().join("out/report.json");
        let table = dir.path().join("out/bands.csv");
        partition(
            &args(input, Some(10.0)),
            4,
            AreaUnit::M2,
            Some(out.clone()),
            Some(table.clone()),
        )
        .unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["partition_count"], 4);
        assert_eq!(doc["calibrated"], true);
        assert!((doc["total_area"]["value"].as_f64().unwrap() - 40.0).abs() < 1e-9);
        assert!(dir.path().join("out/report.provenance.json").exists());
        assert!(dir.path().join("out/bands.provenance.json").exists());

        let csv = fs::read_to_string(&table).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("label,x_from,x_to,raw,area,unit"));
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn geo_measure_points_share_the_boundary_frame() {
        let verts = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.001),
            LatLng::new(0.001, 0.001),
            LatLng::new(0.001, 0.0),
        ];
        let parcel = ParcelInput::Geo(verts.clone());
        let local = parcel::api::project_to_local_meters(&verts);
        let p = to_local(&parcel, [0.001, 0.001]).unwrap();
        assert!((p - local[2]).norm() < 1e-9);
        let traced = ParcelInput::Traced(Vec::new());
        assert_eq!(to_local(&traced, [3.0, 4.0]).unwrap(), Point::new(3.0, 4.0));
    }

    #[test]
    fn degenerate_input_is_an_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("flat.csv");
        fs::write(&input, "x,y\n0,0\n5,0\n10,0\n").unwrap();
        let err = partition(&args(input, None), 2, AreaUnit::M2, None, None).unwrap_err();
        assert!(format!("{err:#}").contains("zero area"), "{err:#}");
    }
}
