// src/data_analysis/linear_fit.rs

use ndarray::Array1;

use crate::error::{LabError, Result};

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluates the line at every x.
    pub fn evaluate(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.slope * xi + self.intercept)
    }
}

/// Fits a degree-1 polynomial to `(x, y)` by ordinary least squares.
///
/// The line always passes through `(mean(x), mean(y))`.
pub fn linear_fit(x: &Array1<f64>, y: &Array1<f64>) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(LabError::LengthMismatch {
            what: "linear fit",
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(LabError::InsufficientData {
            what: "linear fit",
            needed: 2,
            found: x.len(),
        });
    }

    if x.iter().all(|&xi| xi == x[0]) {
        return Err(LabError::DegenerateFit);
    }

    // Normal equations over plain left-to-right sums. ndarray's `sum`/`dot`
    // accumulate in eight lanes, which moves the last bit of the intercept.
    let n = x.len() as f64;
    let sx: f64 = x.iter().sum();
    let sy: f64 = y.iter().sum();
    let sxx: f64 = x.iter().map(|xi| xi * xi).sum();
    let sxy: f64 = x.iter().zip(y.iter()).map(|(xi, yi)| xi * yi).sum();

    let denom = n * sxx - sx * sx;
    if denom == 0.0 {
        return Err(LabError::DegenerateFit);
    }

    Ok(LinearFit {
        slope: (n * sxy - sx * sy) / denom,
        intercept: (sy * sxx - sx * sxy) / denom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_exact_line_recovered() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = x.mapv(|v| -1.5 * v + 0.25);
        let fit = linear_fit(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, -1.5, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_passes_through_mean_point() {
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = array![0.1, -1.3, -2.4, -4.0, -4.9];
        let fit = linear_fit(&x, &y).unwrap();
        let x_mean = x.mean().unwrap();
        let y_mean = y.mean().unwrap();
        assert_relative_eq!(fit.slope * x_mean + fit.intercept, y_mean, epsilon = 1e-12);
    }

    #[test]
    fn test_intercept_on_rounding_edge() {
        // Exact intercept is -0.01025; sequential sums land just above it.
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let y = array![0.002, -1.312, -2.583, -3.898, -5.140, -6.450, -7.72, -9.04];
        let fit = linear_fit(&x, &y).unwrap();
        assert_eq!(format!("{:.4}", fit.intercept), "-0.0102");
        assert_eq!(format!("{:.4}", fit.slope), "-1.2878");
    }

    #[test]
    fn test_evaluate_matches_line() {
        let fit = LinearFit {
            slope: 2.0,
            intercept: -1.0,
        };
        assert_eq!(fit.evaluate(&array![0.0, 1.0, 2.5]), array![-1.0, 1.0, 4.0]);
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let err = linear_fit(&array![1.0], &array![2.0]).unwrap_err();
        assert!(matches!(
            err,
            LabError::InsufficientData { needed: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_identical_x_is_degenerate() {
        let err = linear_fit(&array![2.0, 2.0, 2.0], &array![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, LabError::DegenerateFit));
    }

    #[test]
    fn test_length_mismatch() {
        let err = linear_fit(&array![0.0, 1.0], &array![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            LabError::LengthMismatch { left: 2, right: 3, .. }
        ));
    }
}
