// src/plot_functions/plot_waveform.rs

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;

use crate::constants::{
    COLOR_FIRST_DIFF, COLOR_SAMPLES_HIST, COLOR_SAMPLES_MAIN, COLOR_SECOND_DIFF,
    FD_DEGENERATE_PREFIX, SD_DEGENERATE_PREFIX,
};
use crate::data_analysis::detrend::linear_detrend;
use crate::data_input::capture_data::Waveform;
use crate::error::RenderError;
use crate::plot_framework::{make_graph, make_histogram, make_multigraph, GraphStyle};
use crate::types::RenderResult;

// Degenerate leading elements of the derived series never reach a plot;
// they would dwarf the real signal.
fn tail(data: &[f64], skip: usize) -> &[f64] {
    data.get(skip..).unwrap_or(&[])
}

fn axis_label(name: &Option<String>, unit: &Option<String>) -> String {
    match (name, unit) {
        (Some(n), Some(u)) => format!("{n} ({u})"),
        (Some(n), None) => n.clone(),
        (None, Some(u)) => format!("({u})"),
        (None, None) => String::new(),
    }
}

// Automatic binning has no answer for near-constant data; the artifact is
// skipped with a notice rather than failing the channel.
fn render_histogram(
    outpath: &Path,
    data: &[f64],
    color: plotters::style::RGBColor,
    x_label: &str,
) -> RenderResult<()> {
    match make_histogram(outpath, data, None, color, x_label, "Count") {
        Ok(_) => Ok(()),
        Err(RenderError::DegenerateDistribution { distinct }) => {
            println!(
                "  INFO: Skipping '{}': automatic binning undefined ({} distinct values).",
                outpath.display(),
                distinct
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Renders the waveform artifact set for one numeric channel: raw samples,
/// first and second difference traces, the detrended composite, and the
/// three distribution histograms.
pub fn plot_waveform(waveform: &Waveform, out_folder: &Path) -> RenderResult<()> {
    let name = waveform.name();
    let x: Vec<f64> = waveform
        .x_data
        .iter()
        .map(|d| d.to_f64().unwrap_or(0.0))
        .collect();
    let x_label = axis_label(&waveform.x_name, &waveform.x_unit);
    let y_label = axis_label(&waveform.y_name, &waveform.y_unit);

    make_graph(
        &out_folder.join(format!("{name}.w.png")),
        &x,
        &waveform.y_data,
        &GraphStyle {
            marker_only: true,
            color: *COLOR_SAMPLES_MAIN,
            x_label: x_label.clone(),
            y_label: y_label.clone(),
            ..Default::default()
        },
    )?;

    make_graph(
        &out_folder.join(format!("{name}.fdw.png")),
        tail(&x, FD_DEGENERATE_PREFIX),
        tail(&waveform.fd_data, FD_DEGENERATE_PREFIX),
        &GraphStyle {
            color: *COLOR_FIRST_DIFF,
            x_label: x_label.clone(),
            ..Default::default()
        },
    )?;

    make_graph(
        &out_folder.join(format!("{name}.sdw.png")),
        tail(&x, SD_DEGENERATE_PREFIX),
        tail(&waveform.sd_data, SD_DEGENERATE_PREFIX),
        &GraphStyle {
            color: *COLOR_SECOND_DIFF,
            x_label: x_label.clone(),
            ..Default::default()
        },
    )?;

    let detrended = linear_detrend(tail(&waveform.y_data, SD_DEGENERATE_PREFIX));
    make_multigraph(
        &out_folder.join(format!("{name}.allw.png")),
        tail(&x, SD_DEGENERATE_PREFIX),
        &[
            (detrended.as_slice(), *COLOR_SAMPLES_MAIN),
            (tail(&waveform.fd_data, SD_DEGENERATE_PREFIX), *COLOR_FIRST_DIFF),
            (tail(&waveform.sd_data, SD_DEGENERATE_PREFIX), *COLOR_SECOND_DIFF),
        ],
        &x_label,
        &y_label,
    )?;

    render_histogram(
        &out_folder.join(format!("{name}.h.png")),
        tail(&waveform.y_data, SD_DEGENERATE_PREFIX),
        *COLOR_SAMPLES_HIST,
        &y_label,
    )?;
    render_histogram(
        &out_folder.join(format!("{name}.fdh.png")),
        tail(&waveform.fd_data, SD_DEGENERATE_PREFIX),
        *COLOR_FIRST_DIFF,
        &y_label,
    )?;
    render_histogram(
        &out_folder.join(format!("{name}.sdh.png")),
        tail(&waveform.sd_data, SD_DEGENERATE_PREFIX),
        *COLOR_SECOND_DIFF,
        &y_label,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_never_panics_on_short_input() {
        assert_eq!(tail(&[], 2), &[] as &[f64]);
        assert_eq!(tail(&[1.0], 2), &[] as &[f64]);
        assert_eq!(tail(&[1.0, 2.0, 3.0], 2), &[3.0]);
    }

    #[test]
    fn axis_label_combines_name_and_unit() {
        assert_eq!(
            axis_label(&Some("time".into()), &Some("s".into())),
            "time (s)"
        );
        assert_eq!(axis_label(&Some("time".into()), &None), "time");
        assert_eq!(axis_label(&None, &None), "");
    }
}

// src/plot_functions/plot_waveform.rs
