// src/data_analysis/dac.rs

use std::fmt;

use ndarray::Array1;

use crate::constants::MAX_DAC_BITS;
use crate::data_analysis::linear_fit::{linear_fit, LinearFit};
use crate::data_input::dac_data::DacDataset;
use crate::error::{LabError, Result};

/// Direction a transfer curve is expected to move in as the code increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Monotonicity {
    Increasing,
    /// Inverting DACs: output falls as the code rises.
    Decreasing,
}

#[derive(Debug, Clone, Copy)]
pub struct DacConfig {
    pub vref: f64,
    pub bits: u32,
    pub direction: Monotonicity,
}

impl DacConfig {
    /// Configuration for an inverting DAC of the given resolution.
    pub fn inverting(vref: f64, bits: u32) -> Self {
        Self {
            vref,
            bits,
            direction: Monotonicity::Decreasing,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DacReport {
    pub title: String,
    pub expected: Array1<f64>,
    pub error: Array1<f64>,
    pub fit: LinearFit,
    pub fitted: Array1<f64>,
    pub lsb: f64,
    pub rms_error: f64,
    pub monotonic: bool,
}

fn full_scale_codes(bits: u32) -> f64 {
    2f64.powi(bits as i32)
}

/// Ideal inverting output: `-Vref * 2d / 2^n` for every code `d`.
pub fn expected_output(codes: &Array1<f64>, bits: u32, vref: f64) -> Array1<f64> {
    let full_scale = full_scale_codes(bits);
    codes.mapv(|d| -vref * 2.0 * d / full_scale)
}

/// Voltage step of one least-significant bit.
pub fn lsb_voltage(vref: f64, bits: u32) -> f64 {
    vref / full_scale_codes(bits)
}

/// Root-mean-square of `observed - expected`.
pub fn rms_error(observed: &Array1<f64>, expected: &Array1<f64>) -> Result<f64> {
    if observed.len() != expected.len() {
        return Err(LabError::LengthMismatch {
            what: "RMS error",
            left: observed.len(),
            right: expected.len(),
        });
    }
    let mean_sq = (observed - expected)
        .mapv(|e| e * e)
        .mean()
        .ok_or(LabError::InsufficientData {
            what: "RMS error",
            needed: 1,
            found: 0,
        })?;
    Ok(mean_sq.sqrt())
}

/// True when every consecutive step moves strictly in `direction`.
///
/// Sequences shorter than two samples have no steps and are reported as
/// monotonic; `analyze_dac` rejects them before getting here.
pub fn is_strictly_monotonic(values: &Array1<f64>, direction: Monotonicity) -> bool {
    values
        .windows(2)
        .into_iter()
        .all(|pair| match direction {
            Monotonicity::Increasing => pair[1] - pair[0] > 0.0,
            Monotonicity::Decreasing => pair[1] - pair[0] < 0.0,
        })
}

/// Runs the full transfer-curve analysis for one dataset.
pub fn analyze_dac(dataset: &DacDataset, config: &DacConfig) -> Result<DacReport> {
    if !(1..=MAX_DAC_BITS).contains(&config.bits) {
        return Err(LabError::InvalidInput(format!(
            "DAC resolution must be 1..={MAX_DAC_BITS} bits, got {}",
            config.bits
        )));
    }
    if config.bits != dataset.bits {
        return Err(LabError::InvalidInput(format!(
            "{} analysed with a {}-bit configuration",
            dataset.title, config.bits
        )));
    }
    if !(config.vref.is_finite() && config.vref > 0.0) {
        return Err(LabError::InvalidInput(format!(
            "reference voltage must be positive, got {}",
            config.vref
        )));
    }
    if dataset.codes.len() != dataset.observed.len() {
        return Err(LabError::LengthMismatch {
            what: "DAC codes vs observed voltages",
            left: dataset.codes.len(),
            right: dataset.observed.len(),
        });
    }
    if dataset.codes.len() < 2 {
        return Err(LabError::InsufficientData {
            what: "DAC transfer curve",
            needed: 2,
            found: dataset.codes.len(),
        });
    }
    let full_scale = full_scale_codes(config.bits);
    if let Some(&code) = dataset
        .codes
        .iter()
        .find(|&&d| !(0.0..full_scale).contains(&d))
    {
        return Err(LabError::InvalidInput(format!(
            "code {code} outside 0..{full_scale} for a {}-bit DAC",
            config.bits
        )));
    }

    let expected = expected_output(&dataset.codes, config.bits, config.vref);
    let error = &dataset.observed - &expected;
    let rms = rms_error(&dataset.observed, &expected)?;
    let fit = linear_fit(&dataset.codes, &dataset.observed)?;
    let fitted = fit.evaluate(&dataset.codes);

    Ok(DacReport {
        title: dataset.title.clone(),
        expected,
        error,
        fit,
        fitted,
        lsb: lsb_voltage(config.vref, config.bits),
        rms_error: rms,
        monotonic: is_strictly_monotonic(&dataset.observed, config.direction),
    })
}

impl fmt::Display for DacReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== {} =====", self.title)?;
        writeln!(f, "Resolution (LSB): {:.4} V", self.lsb)?;
        writeln!(f, "RMS Error: {:.4} V", self.rms_error)?;
        writeln!(f, "Slope (V/code): {:.4}", self.fit.slope)?;
        writeln!(f, "Intercept (V): {:.4}", self.fit.intercept)?;
        write!(
            f,
            "Monotonic: {}",
            if self.monotonic { "YES" } else { "NO" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::dac_data::three_bit_dataset;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_expected_output_three_codes() {
        let expected = expected_output(&array![0.0, 1.0, 2.0], 3, 5.0);
        assert_eq!(expected, array![0.0, -1.25, -2.5]);
    }

    #[test]
    fn test_expected_output_strictly_decreasing() {
        for bits in 1..=8u32 {
            let codes = Array1::from_iter((0..1usize << bits).map(|d| d as f64));
            let expected = expected_output(&codes, bits, 5.0);
            assert_eq!(expected[0], 0.0);
            assert!(is_strictly_monotonic(&expected, Monotonicity::Decreasing));
        }
    }

    #[test]
    fn test_lsb() {
        assert_eq!(lsb_voltage(5.0, 3), 0.625);
        assert_eq!(lsb_voltage(5.0, 4), 0.3125);
    }

    #[test]
    fn test_rms_zero_iff_equal() {
        let a = array![0.0, -1.0, -2.0];
        assert_eq!(rms_error(&a, &a).unwrap(), 0.0);
        let b = array![0.0, -1.0, -2.1];
        assert!(rms_error(&a, &b).unwrap() > 0.0);
    }

    #[test]
    fn test_rms_known_value() {
        let observed = array![1.0, -1.0];
        let expected = array![0.0, 0.0];
        assert_eq!(rms_error(&observed, &expected).unwrap(), 1.0);
    }

    #[test]
    fn test_rms_empty_is_error() {
        let empty = Array1::<f64>::zeros(0);
        assert!(matches!(
            rms_error(&empty, &empty),
            Err(LabError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_monotonic_direction_is_explicit() {
        let falling = array![0.0, -1.0, -2.0];
        let rising = array![0.0, 1.0, 2.0];
        let flat_step = array![0.0, -1.0, -1.0];
        assert!(is_strictly_monotonic(&falling, Monotonicity::Decreasing));
        assert!(!is_strictly_monotonic(&falling, Monotonicity::Increasing));
        assert!(is_strictly_monotonic(&rising, Monotonicity::Increasing));
        assert!(!is_strictly_monotonic(&flat_step, Monotonicity::Decreasing));
    }

    #[test]
    fn test_three_bit_report() {
        let report = analyze_dac(&three_bit_dataset(), &DacConfig::inverting(5.0, 3)).unwrap();
        assert_abs_diff_eq!(report.lsb, 0.625, epsilon = 1e-12);
        assert_abs_diff_eq!(report.rms_error, 0.1676, epsilon = 1e-3);
        assert_abs_diff_eq!(report.fit.slope, -1.2878, epsilon = 1e-4);
        assert_abs_diff_eq!(report.fit.intercept, -0.0102, epsilon = 1e-4);
        assert!(report.monotonic);
        assert_eq!(report.fitted.len(), 8);
    }

    #[test]
    fn test_report_text() {
        let report = analyze_dac(&three_bit_dataset(), &DacConfig::inverting(5.0, 3)).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("===== 3-bit DAC ====="));
        assert!(text.contains("Resolution (LSB): 0.6250 V"));
        assert!(text.contains("RMS Error: 0.1676 V"));
        assert!(text.ends_with("Monotonic: YES"));
    }

    #[test]
    fn test_single_sample_rejected() {
        let dataset = DacDataset {
            title: "1-sample".to_string(),
            bits: 3,
            codes: array![0.0],
            observed: array![0.0],
        };
        let err = analyze_dac(&dataset, &DacConfig::inverting(5.0, 3)).unwrap_err();
        assert!(matches!(err, LabError::InsufficientData { found: 1, .. }));
    }

    #[test]
    fn test_bit_width_mismatch_rejected() {
        let ds = three_bit_dataset();
        let err = analyze_dac(&ds, &DacConfig::inverting(5.0, 4)).unwrap_err();
        match err {
            LabError::InvalidInput(msg) => assert!(msg.contains("3-bit DAC"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_code_beyond_full_scale_rejected() {
        let dataset = DacDataset {
            title: "2-bit DAC".to_string(),
            bits: 2,
            codes: array![0.0, 1.0, 2.0, 3.0, 4.0],
            observed: array![0.0, -2.5, -5.0, -7.5, -10.0],
        };
        assert!(matches!(
            analyze_dac(&dataset, &DacConfig::inverting(5.0, 2)),
            Err(LabError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let ds = three_bit_dataset();
        assert!(matches!(
            analyze_dac(&ds, &DacConfig::inverting(5.0, 0)),
            Err(LabError::InvalidInput(_))
        ));
        assert!(matches!(
            analyze_dac(&ds, &DacConfig::inverting(-1.0, 3)),
            Err(LabError::InvalidInput(_))
        ));
    }
}
