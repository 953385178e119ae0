// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::full_palette::BLACK;
use plotters::style::colors::{RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    AUTO_BINS_MAX, AUTO_BINS_MIN, AUTO_BINS_MIN_DISTINCT, FONT_SIZE_AXIS_LABEL,
    FONT_SIZE_CHART_TITLE, FONT_SIZE_MESSAGE, LINE_WIDTH_PLOT, MARKER_RADIUS, PLOT_HEIGHT,
    PLOT_WIDTH,
};
use crate::error::RenderError;
use crate::types::RenderResult;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Cosmetic options for a single-series graph.
#[derive(Clone)]
pub struct GraphStyle {
    pub color: RGBColor,
    pub stroke_width: u32,
    /// Draw sample dots instead of a connecting line.
    pub marker_only: bool,
    pub x_label: String,
    pub y_label: String,
    pub y_limits: Option<(f64, f64)>,
}

impl Default for GraphStyle {
    fn default() -> Self {
        GraphStyle {
            color: BLACK,
            stroke_width: LINE_WIDTH_PLOT,
            marker_only: false,
            x_label: String::new(),
            y_label: String::new(),
            y_limits: None,
        }
    }
}

fn ensure_parent(outpath: &Path) -> RenderResult<()> {
    if let Some(parent) = outpath.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn artifact_stem(outpath: &Path) -> String {
    outpath
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Draw a placeholder message on an otherwise empty plot area.
fn draw_empty_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    artifact: &str,
) -> RenderResult<()> {
    let (x_range, y_range) = area.get_pixel_range();
    let center_x = (x_range.end - x_range.start) / 2;
    let center_y = (y_range.end - y_range.start) / 2;
    let message = format!("{artifact}: no data points");
    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

fn fold_min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min_v, max_v), &v| (min_v.min(v), max_v.max(v)),
    )
}

/// Renders a single series as a `.png` and returns the written path.
///
/// The parent directory is created if needed. Empty input renders a
/// placeholder message instead of failing.
pub fn make_graph(
    outpath: &Path,
    plotdata_x: &[f64],
    plotdata_y: &[f64],
    style: &GraphStyle,
) -> RenderResult<PathBuf> {
    ensure_parent(outpath)?;
    let root_area = BitMapBackend::new(outpath, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    if plotdata_x.is_empty() || plotdata_y.is_empty() {
        draw_empty_message(&root_area, &artifact_stem(outpath))?;
        root_area.present()?;
        return Ok(outpath.to_path_buf());
    }

    let (x_min, x_max) = fold_min_max(plotdata_x);
    let (x_min, x_max) = calculate_range(x_min, x_max);
    let (y_min, y_max) = match style.y_limits {
        Some(limits) => limits,
        None => {
            let (lo, hi) = fold_min_max(plotdata_y);
            calculate_range(lo, hi)
        }
    };

    let mut chart = ChartBuilder::on(&root_area)
        .caption(artifact_stem(outpath), ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(&style.x_label)
        .y_desc(&style.y_label)
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let points = plotdata_x.iter().zip(plotdata_y).map(|(&x, &y)| (x, y));
    if style.marker_only {
        chart.draw_series(
            points.map(|coord| Circle::new(coord, MARKER_RADIUS, style.color.filled())),
        )?;
    } else {
        chart.draw_series(LineSeries::new(
            points,
            style.color.stroke_width(style.stroke_width),
        ))?;
    }

    root_area.present()?;
    Ok(outpath.to_path_buf())
}

/// Renders several series over a shared x sequence and returns the
/// written path.
pub fn make_multigraph(
    outpath: &Path,
    plotdata_x: &[f64],
    plotdata_ys: &[(&[f64], RGBColor)],
    x_label: &str,
    y_label: &str,
) -> RenderResult<PathBuf> {
    ensure_parent(outpath)?;
    let root_area = BitMapBackend::new(outpath, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    if plotdata_x.is_empty() || plotdata_ys.iter().all(|(ys, _)| ys.is_empty()) {
        draw_empty_message(&root_area, &artifact_stem(outpath))?;
        root_area.present()?;
        return Ok(outpath.to_path_buf());
    }

    let (x_min, x_max) = fold_min_max(plotdata_x);
    let (x_min, x_max) = calculate_range(x_min, x_max);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for (ys, _) in plotdata_ys {
        let (lo, hi) = fold_min_max(ys);
        y_min = y_min.min(lo);
        y_max = y_max.max(hi);
    }
    let (y_min, y_max) = calculate_range(y_min, y_max);

    let mut chart = ChartBuilder::on(&root_area)
        .caption(artifact_stem(outpath), ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    for (ys, color) in plotdata_ys {
        chart.draw_series(LineSeries::new(
            plotdata_x.iter().zip(ys.iter()).map(|(&x, &y)| (x, y)),
            color.stroke_width(LINE_WIDTH_PLOT),
        ))?;
    }

    root_area.present()?;
    Ok(outpath.to_path_buf())
}

/// Histogram Binwidth Optimization Method
///
/// Shimazaki and Shinomoto, Neural Comput 19 1503-1527, 2007. Minimizes
/// the cost `(2k - v) / d^2` over candidate bin counts, where `k` and `v`
/// are the mean and (population) variance of the per-bin event counts and
/// `d` the bin width.
///
/// Fails with `DegenerateDistribution` when the data lacks a proper
/// distribution to optimize over (fewer than `AUTO_BINS_MIN_DISTINCT`
/// distinct values); pass an explicit bin count to bypass the selector.
pub fn get_optimum_bins(plotdata_y: &[f64]) -> RenderResult<usize> {
    let mut sorted: Vec<f64> = plotdata_y.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    let distinct = sorted.len();
    if distinct < AUTO_BINS_MIN_DISTINCT {
        return Err(RenderError::DegenerateDistribution { distinct });
    }

    let samples = Array1::from_vec(plotdata_y.to_vec());
    let max_p = *samples
        .max()
        .map_err(|_| RenderError::DegenerateDistribution { distinct })?;
    let min_p = *samples
        .min()
        .map_err(|_| RenderError::DegenerateDistribution { distinct })?;

    let mut best_n = AUTO_BINS_MIN;
    let mut best_cost = f64::INFINITY;
    for n in AUTO_BINS_MIN..AUTO_BINS_MAX {
        let d = (max_p - min_p) / n as f64;
        let cost = if d == 0.0 {
            10_000.0
        } else {
            let counts = histogram_counts(plotdata_y, min_p, max_p, n);
            let ki = Array1::from_iter(counts.iter().map(|&c| c as f64));
            let k = ki.mean().unwrap_or(0.0);
            let v = ki.mapv(|c| (c - k).powi(2)).sum() / n as f64;
            (2.0 * k - v) / (d * d)
        };
        if cost < best_cost {
            best_cost = cost;
            best_n = n;
        }
    }
    Ok(best_n)
}

// Event counts over `bins` equal-width bins spanning [min_p, max_p]; the
// final bin is closed so the maximum lands in it.
fn histogram_counts(data: &[f64], min_p: f64, max_p: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    let span = max_p - min_p;
    if span <= 0.0 || bins == 0 {
        return counts;
    }
    for &v in data {
        if v < min_p || v > max_p || !v.is_finite() {
            continue;
        }
        let idx = (((v - min_p) / span) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

/// Renders a histogram as a `.png` and returns the written path.
///
/// `bins = None` selects the bin count with `get_optimum_bins`, which may
/// fail with `DegenerateDistribution`; supply an explicit count to bypass
/// it.
pub fn make_histogram(
    outpath: &Path,
    plotdata_y: &[f64],
    bins: Option<usize>,
    color: RGBColor,
    x_label: &str,
    y_label: &str,
) -> RenderResult<PathBuf> {
    let bins = match bins {
        Some(n) => n.max(1),
        None => get_optimum_bins(plotdata_y)?,
    };

    ensure_parent(outpath)?;
    let root_area = BitMapBackend::new(outpath, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    if plotdata_y.is_empty() {
        draw_empty_message(&root_area, &artifact_stem(outpath))?;
        root_area.present()?;
        return Ok(outpath.to_path_buf());
    }

    let (mut min_p, mut max_p) = fold_min_max(plotdata_y);
    if max_p - min_p <= 0.0 {
        // Constant data with an explicit bin count still gets one bar.
        min_p -= 0.5;
        max_p += 0.5;
    }
    let counts = histogram_counts(plotdata_y, min_p, max_p, bins);
    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;

    let (x_lo, x_hi) = calculate_range(min_p, max_p);
    let mut chart = ChartBuilder::on(&root_area)
        .caption(artifact_stem(outpath), ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, 0.0..max_count * 1.15 + 1.0)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let bin_width = (max_p - min_p) / bins as f64;
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let left = min_p + i as f64 * bin_width;
        Rectangle::new(
            [(left, 0.0), (left + bin_width, count as f64)],
            color.filled(),
        )
    }))?;

    root_area.present()?;
    Ok(outpath.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_range_pads_and_orders() {
        let (lo, hi) = calculate_range(0.0, 10.0);
        assert!(lo < 0.0 && hi > 10.0);
        let (lo, hi) = calculate_range(10.0, 0.0);
        assert!(lo < 0.0 && hi > 10.0);
        // Near-constant input gets a fixed pad instead of a zero span.
        let (lo, hi) = calculate_range(1.0, 1.0);
        assert!(hi - lo >= 1.0);
    }

    #[test]
    fn optimum_bins_rejects_degenerate_distributions() {
        let narrow = [1.0, 2.0, 1.0, 2.0, 3.0, 4.0];
        match get_optimum_bins(&narrow) {
            Err(RenderError::DegenerateDistribution { distinct }) => assert_eq!(distinct, 4),
            other => panic!("expected DegenerateDistribution, got {other:?}"),
        }
    }

    #[test]
    fn optimum_bins_stays_in_search_range() {
        let spread: Vec<f64> = (0..200).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        let bins = get_optimum_bins(&spread).unwrap();
        assert!((AUTO_BINS_MIN..AUTO_BINS_MAX).contains(&bins));
    }

    #[test]
    fn histogram_counts_close_the_last_bin() {
        let counts = histogram_counts(&[0.0, 1.0, 2.0, 3.0], 0.0, 3.0, 3);
        assert_eq!(counts, vec![1, 1, 2]);
    }
}

// src/plot_framework.rs
