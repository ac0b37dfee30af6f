use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use crate::workflow::runner::ComparisonResult;

const PALETTE: [&RGBColor; 4] = [&BLUE, &RED, &GREEN, &MAGENTA];

/// Renders the comparison overlay: raw flux sequences on the upper panel,
/// peak-normalized sequences on the lower one. Observational output only.
pub fn render_comparison(path: &Path, result: &ComparisonResult) -> Result<()> {
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("filling plot background: {}", e))?;
    let (upper, lower) = root.split_vertically(384);

    let raw: Vec<(&str, Vec<f64>)> = vec![
        ("boxcar narrow", result.narrow.flux().to_vec()),
        ("boxcar full", result.full.flux().to_vec()),
        ("horne", result.horne_combined.flux().to_vec()),
    ];
    draw_panel(&upper, "Extracted flux", &raw)?;

    let normalized: Vec<(&str, Vec<f64>)> = vec![
        ("boxcar narrow", result.narrow.normalized().flux().to_vec()),
        ("boxcar full", result.full.normalized().flux().to_vec()),
        ("horne", result.horne_combined.normalized().flux().to_vec()),
    ];
    draw_panel(&lower, "Peak-normalized flux", &normalized)?;

    root.present()
        .map_err(|e| anyhow!("writing plot {}: {}", path.display(), e))?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    series: &[(&str, Vec<f64>)],
) -> Result<()> {
    let ncols = series
        .iter()
        .map(|(_, flux)| flux.len())
        .max()
        .unwrap_or(0)
        .max(1);
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, flux) in series {
        for &value in flux {
            if value.is_finite() {
                y_min = y_min.min(value);
                y_max = y_max.max(value);
            }
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min) * 0.05).max(1e-3);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(32)
        .y_label_area_size(56)
        .build_cartesian_2d(0.0..ncols as f64, (y_min - pad)..(y_max + pad))
        .map_err(|e| anyhow!("building chart '{}': {}", title, e))?;

    chart
        .configure_mesh()
        .x_desc("dispersion column")
        .y_desc("flux")
        .draw()
        .map_err(|e| anyhow!("drawing mesh for '{}': {}", title, e))?;

    for (idx, (label, flux)) in series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(
                flux.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                color,
            ))
            .map_err(|e| anyhow!("drawing series '{}': {}", label, e))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| anyhow!("drawing legend for '{}': {}", title, e))?;
    Ok(())
}
