// src/plot_functions/plot_hvl.rs

use std::path::Path;

use crate::constants::{
    COLOR_DATA, COLOR_HALF_COUNT, COLOR_HVL, LINE_WIDTH_PLOT, LINE_WIDTH_REFERENCE,
};
use crate::data_analysis::attenuation::HvlReport;
use crate::data_input::attenuation_data::AttenuationDataset;
use crate::error::{LabError, Result};
use crate::plot_framework::{
    draw_chart, padded_bounds, MarkerShape, Orientation, PlotConfig, PlotSeries, ReferenceLine,
    SeriesStyle,
};

/// Net counts against thickness, with the half count and the HVL marked.
pub fn hvl_config(dataset: &AttenuationDataset, report: &HvlReport) -> Option<PlotConfig> {
    let data: Vec<(f64, f64)> = dataset
        .thickness_cm
        .iter()
        .cloned()
        .zip(report.net_counts.iter().cloned())
        .collect();

    // Keep both reference lines inside the visible area.
    let (x_range, y_range) = padded_bounds(
        data.iter()
            .cloned()
            .chain([(report.hvl_cm, report.i_half)]),
    )?;

    Some(PlotConfig {
        title: format!("Counts vs Thickness ({})", dataset.material),
        x_range,
        y_range,
        series: vec![PlotSeries {
            data,
            label: "Data".to_string(),
            color: *COLOR_DATA,
            stroke_width: LINE_WIDTH_PLOT,
            style: SeriesStyle::DashedWithMarkers(MarkerShape::Circle),
        }],
        reference_lines: vec![
            ReferenceLine {
                orientation: Orientation::Horizontal,
                value: report.i_half,
                label: "Half Count".to_string(),
                color: *COLOR_HALF_COUNT,
                stroke_width: LINE_WIDTH_REFERENCE,
            },
            ReferenceLine {
                orientation: Orientation::Vertical,
                value: report.hvl_cm,
                label: "HVL".to_string(),
                color: *COLOR_HVL,
                stroke_width: LINE_WIDTH_REFERENCE,
            },
        ],
        x_label: "Thickness (cm)".to_string(),
        y_label: "Counts".to_string(),
        show_grid: false,
    })
}

pub fn plot_hvl(output_path: &Path, dataset: &AttenuationDataset, report: &HvlReport) -> Result<()> {
    let config = hvl_config(dataset, report)
        .ok_or_else(|| LabError::Plot(format!("{}: no finite points to plot", dataset.material)))?;
    draw_chart(output_path, &config)
}
