//! SVG rendering of a [`Diagram`] with `plotters`.

use std::ops::Range;
use std::path::Path;

use pd_curves::CurveKind;
use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;
use tracing::debug;

use crate::config::{DisplayOptions, Scale};
use crate::diagram_service::Diagram;
use crate::error::{AppError, AppResult};

fn render_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Render(e.to_string())
}

fn colour(kind: CurveKind) -> RGBColor {
    match kind {
        CurveKind::SolidLiquid => RGBColor(31, 119, 180),
        CurveKind::SolidVapor => RGBColor(44, 160, 44),
        CurveKind::LiquidVaporClapeyron => RGBColor(214, 39, 40),
        CurveKind::LiquidVaporAntoine => RGBColor(148, 103, 189),
    }
}

/// A curve or marker converted to display units, ready to plot.
struct Series {
    label: String,
    kind: Option<CurveKind>,
    points: Vec<(f64, f64)>,
}

fn display_series(diagram: &Diagram, opts: &DisplayOptions) -> (Vec<Series>, Vec<Series>) {
    let log = opts.scale == Scale::Log;
    let convert = |t: f64, p: f64| {
        (
            opts.temperature_unit.from_kelvin(t),
            opts.pressure_unit.from_pascal(p),
        )
    };
    let plottable = |&(t, p): &(f64, f64)| t.is_finite() && p.is_finite() && (!log || p > 0.0);

    let curves = diagram
        .curves
        .iter()
        .map(|curve| {
            let points: Vec<(f64, f64)> = curve
                .points()
                .iter()
                .map(|&(t, p)| convert(t, p))
                .filter(plottable)
                .collect();
            if points.len() < curve.len() {
                debug!(
                    curve = %curve.kind(),
                    skipped = curve.len() - points.len(),
                    "skipping samples that cannot be plotted"
                );
            }
            Series {
                label: curve.kind().display_name().to_string(),
                kind: Some(curve.kind()),
                points,
            }
        })
        .collect();

    let mut markers = vec![Series {
        label: "Triple point".to_string(),
        kind: None,
        points: vec![convert(diagram.triple.temperature_k, diagram.triple.pressure_pa)],
    }];
    if let Some(critical) = diagram.critical {
        markers.push(Series {
            label: "Critical point".to_string(),
            kind: None,
            points: vec![convert(critical.temperature_k, critical.pressure_pa)],
        });
    }
    for marker in &mut markers {
        marker.points.retain(plottable);
    }

    (curves, markers)
}

fn bounds<'a>(series: impl Iterator<Item = &'a Series>) -> Option<(Range<f64>, Range<f64>)> {
    let mut t = (f64::INFINITY, f64::NEG_INFINITY);
    let mut p = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in series.flat_map(|s| s.points.iter()) {
        t = (t.0.min(x), t.1.max(x));
        p = (p.0.min(y), p.1.max(y));
    }
    if t.0 > t.1 {
        return None;
    }
    Some((t.0..t.1, p.0..p.1))
}

fn padded_linear(range: Range<f64>) -> Range<f64> {
    let pad = ((range.end - range.start) * 0.05).max(range.end.abs() * 1e-3).max(1e-9);
    (range.start - pad)..(range.end + pad)
}

fn padded_log(range: Range<f64>) -> Range<f64> {
    (range.start / 2.0)..(range.end * 2.0)
}

/// Render the diagram to an SVG document.
pub fn render_svg(diagram: &Diagram, opts: &DisplayOptions) -> AppResult<String> {
    let (curves, markers) = display_series(diagram, opts);
    let (t_range, p_range) = bounds(curves.iter().chain(markers.iter()))
        .ok_or_else(|| AppError::Render("nothing to plot".to_string()))?;
    let t_range = padded_linear(t_range);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (opts.width, opts.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        match opts.scale {
            Scale::Log => draw_chart(
                &root,
                diagram,
                opts,
                &curves,
                &markers,
                t_range,
                padded_log(p_range).log_scale(),
            )?,
            Scale::Linear => draw_chart(
                &root,
                diagram,
                opts,
                &curves,
                &markers,
                t_range,
                padded_linear(p_range),
            )?,
        }

        root.present().map_err(render_err)?;
    }

    Ok(svg)
}

fn draw_chart<Y>(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    diagram: &Diagram,
    opts: &DisplayOptions,
    curves: &[Series],
    markers: &[Series],
    t_range: Range<f64>,
    p_range: Y,
) -> AppResult<()>
where
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let title = opts
        .title
        .clone()
        .unwrap_or_else(|| diagram.default_title());
    let scientific = opts.scale == Scale::Log;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(t_range, p_range)
        .map_err(render_err)?;

    let y_fmt = |v: &f64| {
        if scientific {
            format!("{:.1e}", v)
        } else {
            format!("{}", v)
        }
    };
    chart
        .configure_mesh()
        .x_desc(format!("Temperature [{}]", opts.temperature_unit.symbol()))
        .y_desc(format!("Pressure [{}]", opts.pressure_unit.symbol()))
        .y_label_formatter(&y_fmt)
        .draw()
        .map_err(render_err)?;

    for series in curves {
        let c = series.kind.map(colour).unwrap_or(BLACK);
        chart
            .draw_series(LineSeries::new(series.points.iter().copied(), c.stroke_width(2)))
            .map_err(render_err)?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], c.stroke_width(2)));
    }

    for marker in markers {
        chart
            .draw_series(PointSeries::of_element(
                marker.points.iter().copied(),
                6,
                BLACK.stroke_width(2),
                &|c, s, st| EmptyElement::at(c) + Circle::new((0, 0), s, st),
            ))
            .map_err(render_err)?
            .label(marker.label.as_str())
            .legend(|(x, y)| Circle::new((x + 10, y), 5, BLACK.stroke_width(2)));
    }

    if opts.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

/// Render and write the SVG to `path`.
pub fn save_svg(diagram: &Diagram, opts: &DisplayOptions, path: &Path) -> AppResult<()> {
    let svg = render_svg(diagram, opts)?;
    std::fs::write(path, svg)?;
    debug!(path = %path.display(), "diagram written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagramConfig;
    use crate::diagram_service::build_diagram;
    use pd_compounds::Dataset;
    use pd_core::PressureUnit;

    fn water() -> Diagram {
        let dataset = Dataset::builtin().unwrap();
        build_diagram(&dataset, "water", &DiagramConfig::default()).unwrap()
    }

    #[test]
    fn svg_contains_title_axes_and_legend() {
        let opts = DisplayOptions {
            pressure_unit: PressureUnit::Kilopascal,
            ..Default::default()
        };
        let svg = render_svg(&water(), &opts).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Phase diagram of water"));
        assert!(svg.contains("Temperature [K]"));
        assert!(svg.contains("Pressure [kPa]"));
        assert!(svg.contains("Triple point"));
        assert!(svg.contains("Liquid-vapor (Antoine)"));
    }

    #[test]
    fn linear_scale_without_legend() {
        let opts = DisplayOptions {
            scale: Scale::Linear,
            legend: false,
            title: Some("Custom".to_string()),
            ..Default::default()
        };
        let svg = render_svg(&water(), &opts).unwrap();
        assert!(svg.contains("Custom"));
        assert!(!svg.contains("Triple point"));
    }

    #[test]
    fn log_axis_skips_non_positive_pressures() {
        let diagram = water();
        let (curves, _) = display_series(&diagram, &DisplayOptions::default());
        for series in &curves {
            assert!(series.points.iter().all(|&(_, p)| p > 0.0));
        }
    }

    #[test]
    fn save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.svg");
        save_svg(&water(), &DisplayOptions::default(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
    }
}
