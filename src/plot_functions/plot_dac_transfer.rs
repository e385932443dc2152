// src/plot_functions/plot_dac_transfer.rs

use std::path::Path;

use plotters::style::RGBColor;

use crate::constants::{COLOR_BEST_FIT, COLOR_EXPECTED, COLOR_OBSERVED, LINE_WIDTH_PLOT};
use crate::data_analysis::dac::DacReport;
use crate::data_input::dac_data::DacDataset;
use crate::error::{LabError, Result};
use crate::plot_framework::{
    draw_chart, padded_bounds, MarkerShape, PlotConfig, PlotSeries, SeriesStyle,
};

fn zip_points(x: &ndarray::Array1<f64>, y: &ndarray::Array1<f64>) -> Vec<(f64, f64)> {
    x.iter().cloned().zip(y.iter().cloned()).collect()
}

/// Expected, observed and best-fit transfer curves on one chart.
pub fn dac_transfer_config(dataset: &DacDataset, report: &DacReport) -> Option<PlotConfig> {
    let expected = zip_points(&dataset.codes, &report.expected);
    let observed = zip_points(&dataset.codes, &dataset.observed);
    let fitted = zip_points(&dataset.codes, &report.fitted);

    let (x_range, y_range) =
        padded_bounds(expected.iter().chain(&observed).chain(&fitted).cloned())?;

    let color_expected: RGBColor = *COLOR_EXPECTED;
    let color_observed: RGBColor = *COLOR_OBSERVED;
    let color_fit: RGBColor = *COLOR_BEST_FIT;

    Some(PlotConfig {
        title: format!("{}-bit Inverting DAC Transfer Characteristic", dataset.bits),
        x_range,
        y_range,
        series: vec![
            PlotSeries {
                data: expected,
                label: "Expected".to_string(),
                color: color_expected,
                stroke_width: LINE_WIDTH_PLOT,
                style: SeriesStyle::LineWithMarkers(MarkerShape::Circle),
            },
            PlotSeries {
                data: observed,
                label: "Observed".to_string(),
                color: color_observed,
                stroke_width: LINE_WIDTH_PLOT,
                style: SeriesStyle::Markers(MarkerShape::Square),
            },
            PlotSeries {
                data: fitted,
                label: "Best Fit".to_string(),
                color: color_fit,
                stroke_width: LINE_WIDTH_PLOT,
                style: SeriesStyle::Dashed,
            },
        ],
        reference_lines: Vec::new(),
        x_label: "Digital Input (Decimal)".to_string(),
        y_label: "Output Voltage (V)".to_string(),
        show_grid: true,
    })
}

/// Saves the transfer characteristic to `output_path`.
pub fn plot_dac_transfer(output_path: &Path, dataset: &DacDataset, report: &DacReport) -> Result<()> {
    let config = dac_transfer_config(dataset, report)
        .ok_or_else(|| LabError::Plot(format!("{}: no finite points to plot", dataset.title)))?;
    draw_chart(output_path, &config)
}
