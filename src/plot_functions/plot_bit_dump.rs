// src/plot_functions/plot_bit_dump.rs

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;

use crate::constants::{COLOR_BIT_SERIES, LINE_WIDTH_BIT_PLOT};
use crate::data_input::capture_data::BitDump;
use crate::plot_framework::{make_graph, GraphStyle};
use crate::types::RenderResult;

/// Renders the binary-dump artifact set for one channel: one trace per bit
/// position and one per adjacent-bit transition series.
pub fn plot_bit_dump(dump: &BitDump, out_folder: &Path) -> RenderResult<()> {
    let name = dump.name();
    let x: Vec<f64> = dump
        .x_data
        .iter()
        .map(|d| d.to_f64().unwrap_or(0.0))
        .collect();

    let style = GraphStyle {
        color: *COLOR_BIT_SERIES,
        stroke_width: LINE_WIDTH_BIT_PLOT,
        ..Default::default()
    };

    for (b, series) in dump.bit_data.iter().enumerate() {
        let y: Vec<f64> = series.iter().map(|&v| v as f64).collect();
        make_graph(
            &out_folder.join(format!("{name}.b{b}.png")),
            &x,
            &y,
            &style,
        )?;
    }

    for (b, series) in dump.transition_data.iter().enumerate() {
        let y: Vec<f64> = series.iter().map(|&v| v as f64).collect();
        make_graph(
            &out_folder.join(format!("{name}.x{}-{}.png", b, b + 1)),
            &x,
            &y,
            &style,
        )?;
    }

    Ok(())
}

// src/plot_functions/plot_bit_dump.rs
