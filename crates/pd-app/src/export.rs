//! Curve export: long-format CSV and a JSON document.

use std::io;

use pd_compounds::PhasePoint;
use pd_curves::{Curve, CurveKind};
use serde::Serialize;

use crate::config::DisplayOptions;
use crate::diagram_service::Diagram;
use crate::error::AppResult;

#[derive(Serialize)]
struct CsvRow {
    curve: &'static str,
    temperature: f64,
    pressure: f64,
}

const CSV_HEADER: [&str; 3] = ["curve", "temperature", "pressure"];

/// Write every curve as `curve,temperature,pressure` rows in display units.
///
/// The header is written even when the diagram has no curves.
pub fn write_csv<W: io::Write>(
    diagram: &Diagram,
    writer: W,
    display: &DisplayOptions,
) -> AppResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for curve in &diagram.curves {
        for &(t, p) in curve.points() {
            wtr.serialize(CsvRow {
                curve: curve.kind().key(),
                temperature: display.temperature_unit.from_kelvin(t),
                pressure: display.pressure_unit.from_pascal(p),
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonPoint {
    temperature_k: f64,
    pressure_pa: f64,
}

impl From<PhasePoint> for JsonPoint {
    fn from(p: PhasePoint) -> Self {
        Self {
            temperature_k: p.temperature_k,
            pressure_pa: p.pressure_pa,
        }
    }
}

#[derive(Serialize)]
struct JsonCurve<'a> {
    kind: CurveKind,
    label: &'static str,
    /// (K, Pa) pairs
    points: &'a [(f64, f64)],
    #[serde(skip_serializing_if = "Option::is_none")]
    fitted_range_k: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "is_zero")]
    extrapolated: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl<'a> From<&'a Curve> for JsonCurve<'a> {
    fn from(curve: &'a Curve) -> Self {
        Self {
            kind: curve.kind(),
            label: curve.kind().display_name(),
            points: curve.points(),
            fitted_range_k: curve.antoine_fit().map(|fit| fit.valid_range()),
            extrapolated: curve.extrapolated_points().len(),
        }
    }
}

#[derive(Serialize)]
struct JsonDiagram<'a> {
    name: &'a str,
    formula: &'a str,
    cas: &'a str,
    triple: JsonPoint,
    critical: Option<JsonPoint>,
    curves: Vec<JsonCurve<'a>>,
    omitted: &'a [CurveKind],
}

/// Serialize the diagram to pretty JSON (K and Pa).
pub fn to_json(diagram: &Diagram) -> AppResult<String> {
    let doc = JsonDiagram {
        name: &diagram.name,
        formula: &diagram.formula,
        cas: &diagram.cas,
        triple: diagram.triple.into(),
        critical: diagram.critical.map(JsonPoint::from),
        curves: diagram.curves.iter().map(JsonCurve::from).collect(),
        omitted: &diagram.omitted,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
