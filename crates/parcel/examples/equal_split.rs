//! Split a few random parcels into equal bands and print the area tables.
//!
//! Usage:
//!   cargo run -p parcel --example equal_split -- 4
//!
//! The argument is the number of partitions (default 3). Each sample is a
//! 200 px wide parcel calibrated by a 20 m reference on its first edge.

use parcel::api::{
    draw_parcel_radial, recenter_rescale, AreaUnit, LengthUnit, ParcelReplay, RadialCfg, Session,
    VertexCount,
};

fn main() {
    let n: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 5, max: 14 },
        ..RadialCfg::default()
    };
    let mut tok = ParcelReplay {
        seed: 2025,
        index: 0,
    };
    for index in 0..4 {
        let raw = draw_parcel_radial(cfg, tok);
        tok = tok.next();
        let Some(poly) = recenter_rescale(&raw, 200.0) else {
            continue;
        };
        let mut session = Session::default();
        session.set_reference(Some(20.0), LengthUnit::M);
        if let Err(e) = session.finalize_boundary(poly) {
            eprintln!("sample {index}: {e}");
            continue;
        }
        if let Err(e) = session.generate(n) {
            eprintln!("sample {index}: {e}");
            continue;
        }
        match session.area_table(AreaUnit::M2) {
            Ok(table) => {
                println!("sample {index}: total {}", table.total);
                for row in &table.rows {
                    println!("  {} [{:8.2}, {:8.2}] {}", row.label, row.x_from, row.x_to, row.area);
                }
            }
            Err(e) => eprintln!("sample {index}: {e}"),
        }
    }
}
