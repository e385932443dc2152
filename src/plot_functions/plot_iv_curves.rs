// src/plot_functions/plot_iv_curves.rs

use std::path::{Path, PathBuf};

use ndarray::Array1;

use crate::constants::{COLOR_IV_CURVE, LINE_WIDTH_PLOT};
use crate::data_input::iv_table::IvSamples;
use crate::error::{LabError, Result};
use crate::plot_framework::{
    draw_chart, ensure_output_dir, padded_bounds, MarkerShape, PlotConfig, PlotSeries,
    SeriesStyle,
};

/// `<dir>/<Title>/I-V Curve (<Filter>) - <Title>.png` and the P-V counterpart.
pub fn iv_output_paths(image_dir: &Path, title: &str, filter: &str) -> (PathBuf, PathBuf) {
    let dir = image_dir.join(title);
    (
        dir.join(format!("I-V Curve ({filter}) - {title}.png")),
        dir.join(format!("P-V Curve ({filter}) - {title}.png")),
    )
}

fn curve_config(
    title: String,
    voltage: &Array1<f64>,
    y: &Array1<f64>,
    y_label: &str,
) -> Option<PlotConfig> {
    let data: Vec<(f64, f64)> = voltage.iter().cloned().zip(y.iter().cloned()).collect();
    let (x_range, y_range) = padded_bounds(data.iter().cloned())?;
    Some(PlotConfig {
        title,
        x_range,
        y_range,
        series: vec![PlotSeries {
            data,
            label: String::new(),
            color: *COLOR_IV_CURVE,
            stroke_width: LINE_WIDTH_PLOT,
            style: SeriesStyle::LineWithMarkers(MarkerShape::Circle),
        }],
        reference_lines: Vec::new(),
        x_label: "Voltage (V)".to_string(),
        y_label: y_label.to_string(),
        show_grid: true,
    })
}

pub fn iv_curve_config(title: &str, filter: &str, samples: &IvSamples) -> Option<PlotConfig> {
    curve_config(
        format!("I-V Curve ({filter}) - {title}"),
        &samples.voltage,
        &samples.current,
        "Current (A)",
    )
}

pub fn pv_curve_config(title: &str, filter: &str, samples: &IvSamples) -> Option<PlotConfig> {
    curve_config(
        format!("P-V Curve ({filter}) - {title}"),
        &samples.voltage,
        &samples.power,
        "Power (W)",
    )
}

/// Writes the I-V and P-V charts of one filter into `<image_dir>/<title>/`.
pub fn plot_iv_curves(
    image_dir: &Path,
    title: &str,
    filter: &str,
    samples: &IvSamples,
) -> Result<()> {
    let (iv_path, pv_path) = iv_output_paths(image_dir, title, filter);
    ensure_output_dir(&iv_path)?;

    let no_points = || LabError::Plot(format!("{title} / {filter}: no finite points to plot"));
    let iv = iv_curve_config(title, filter, samples).ok_or_else(no_points)?;
    let pv = pv_curve_config(title, filter, samples).ok_or_else(no_points)?;

    draw_chart(&iv_path, &iv)?;
    draw_chart(&pv_path, &pv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_output_paths() {
        let (iv, pv) = iv_output_paths(Path::new("Images"), "Lamp Illumination", "No Filter");
        assert_eq!(
            iv,
            Path::new("Images/Lamp Illumination/I-V Curve (No Filter) - Lamp Illumination.png")
        );
        assert_eq!(
            pv,
            Path::new("Images/Lamp Illumination/P-V Curve (No Filter) - Lamp Illumination.png")
        );
    }

    #[test]
    fn test_curve_configs() {
        let samples = IvSamples::new(array![0.0, 0.3, 0.5], array![0.01, 0.008, 0.0]);
        let iv = iv_curve_config("Sunlight Illumination", "Pink Filter", &samples).unwrap();
        let pv = pv_curve_config("Sunlight Illumination", "Pink Filter", &samples).unwrap();
        assert_eq!(iv.title, "I-V Curve (Pink Filter) - Sunlight Illumination");
        assert_eq!(iv.y_label, "Current (A)");
        assert_eq!(pv.y_label, "Power (W)");
        assert_eq!(pv.series[0].data[1].1, 0.3 * 0.008);
    }

    #[test]
    fn test_empty_samples_have_no_config() {
        let samples = IvSamples::new(Array1::zeros(0), Array1::zeros(0));
        assert!(iv_curve_config("t", "f", &samples).is_none());
    }
}
