//! SVG rendering of a [`Figure`].

use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::figure::{Figure, LegendPosition, SeriesColor, PALETTE_LEN};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const PALETTE: [RGBColor; PALETTE_LEN] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const GREY: RGBColor = RGBColor(160, 160, 160);

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

fn series_color(color: SeriesColor) -> RGBColor {
    match color {
        SeriesColor::Palette(i) => PALETTE[i % PALETTE_LEN],
        SeriesColor::Grey => GREY,
        SeriesColor::Red => RED,
    }
}

fn label_position(position: Option<LegendPosition>) -> SeriesLabelPosition {
    match position {
        Some(LegendPosition::UpperLeft) => SeriesLabelPosition::UpperLeft,
        Some(LegendPosition::LowerLeft) => SeriesLabelPosition::LowerLeft,
        Some(LegendPosition::LowerRight) => SeriesLabelPosition::LowerRight,
        Some(LegendPosition::UpperRight) | None => SeriesLabelPosition::UpperRight,
    }
}

fn padded(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let pad = (min.abs() * 0.05).max(0.5);
        return (min - pad)..(max + pad);
    }
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}

/// Axis ranges covering every finite series point and annotation, padded by 5%
pub fn data_bounds(figure: &Figure) -> Option<(Range<f64>, Range<f64>)> {
    let points = figure
        .series()
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .chain(figure.annotations().iter().map(|a| (a.x, a.y)))
        .filter(|(x, y)| x.is_finite() && y.is_finite());

    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for (x, y) in points {
        bounds = Some(match bounds {
            None => (x, x, y, y),
            Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        });
    }
    bounds.map(|(x0, x1, y0, y1)| (padded(x0, x1), padded(y0, y1)))
}

/// Draw `figure` into an SVG file at `path`
pub fn render_svg<P: AsRef<Path>>(figure: &Figure, path: P, config: &PlotConfig) -> Result<()> {
    let (x_range, y_range) = data_bounds(figure).ok_or(PlotError::EmptyFigure)?;

    let root = SVGBackend::new(path.as_ref(), (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(60);
    if let Some(title) = figure.title() {
        builder.caption(title, ("sans-serif", 30));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(figure.x_label().unwrap_or_default())
        .y_desc(figure.y_label().unwrap_or_default())
        .draw()
        .map_err(render_err)?;

    for series in figure.series() {
        let color = series_color(series.color);
        let drawn = chart
            .draw_series(LineSeries::new(series.points.iter().copied(), &color))
            .map_err(render_err)?;
        if let Some(label) = &series.label {
            drawn
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    for note in figure.annotations() {
        chart
            .draw_series(std::iter::once(Text::new(
                note.text.clone(),
                (note.x, note.y),
                ("sans-serif", 14),
            )))
            .map_err(render_err)?;
    }

    if figure.labeled_series().next().is_some() {
        chart
            .configure_series_labels()
            .position(label_position(figure.legend_position()))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    log::info!("rendered {} series to {}", figure.series().len(), path.as_ref().display());
    Ok(())
}
