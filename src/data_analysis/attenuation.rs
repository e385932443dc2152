// src/data_analysis/attenuation.rs

use std::f64::consts::LN_2;
use std::fmt;

use ndarray::Array1;

use crate::data_input::attenuation_data::AttenuationDataset;
use crate::error::{LabError, Result};

#[derive(Debug, Clone)]
pub struct HvlReport {
    pub material: String,
    pub net_counts: Array1<f64>,
    pub i0: f64,
    pub i_half: f64,
    pub hvl_cm: f64,
    /// Linear attenuation coefficient (cm^-1).
    pub mu: f64,
    /// Mass attenuation coefficient (cm^2/g).
    pub mu_mass: f64,
}

impl HvlReport {
    /// Relative deviation of the measured mu from a reference value.
    pub fn mu_deviation_from(&self, reference_mu: f64) -> f64 {
        (self.mu - reference_mu) / reference_mu
    }
}

/// Gross counts minus a constant background.
pub fn net_counts(gross: &Array1<f64>, background: f64) -> Array1<f64> {
    gross - background
}

/// Thickness at which `counts` first falls through `i_half`.
///
/// Scans adjacent pairs in order and interpolates linearly inside the first
/// pair with `counts[i] >= i_half >= counts[i + 1]`. A flat pair sitting on
/// `i_half` resolves to its left thickness. Returns `None` when no pair
/// brackets the half count.
pub fn find_half_value_crossing(
    thickness: &Array1<f64>,
    counts: &Array1<f64>,
    i_half: f64,
) -> Option<f64> {
    let n = thickness.len().min(counts.len());
    (0..n.saturating_sub(1)).find_map(|i| {
        let (x1, x2) = (thickness[i], thickness[i + 1]);
        let (y1, y2) = (counts[i], counts[i + 1]);
        if y1 >= i_half && y2 <= i_half {
            if y2 == y1 {
                Some(x1)
            } else {
                Some(x1 + (i_half - y1) * (x2 - x1) / (y2 - y1))
            }
        } else {
            None
        }
    })
}

/// `(mu, mu_mass)` from a half-value layer and the absorber density.
pub fn attenuation_coefficients(hvl_cm: f64, density_g_cm3: f64) -> (f64, f64) {
    let mu = LN_2 / hvl_cm;
    (mu, mu / density_g_cm3)
}

pub fn analyze_attenuation(dataset: &AttenuationDataset) -> Result<HvlReport> {
    let thickness = &dataset.thickness_cm;
    if thickness.len() != dataset.gross_counts.len() {
        return Err(LabError::LengthMismatch {
            what: "thickness vs counts",
            left: thickness.len(),
            right: dataset.gross_counts.len(),
        });
    }
    if thickness.len() < 2 {
        return Err(LabError::InsufficientData {
            what: "half-value layer",
            needed: 2,
            found: thickness.len(),
        });
    }
    if !(dataset.density_g_cm3 > 0.0) {
        return Err(LabError::InvalidInput(format!(
            "absorber density must be positive, got {}",
            dataset.density_g_cm3
        )));
    }

    let counts = net_counts(&dataset.gross_counts, dataset.background);
    let i0 = counts[0];
    if !(i0 > 0.0) {
        return Err(LabError::InvalidInput(format!(
            "net count at zero thickness must be positive, got {i0}"
        )));
    }
    let i_half = i0 / 2.0;

    let hvl_cm = find_half_value_crossing(thickness, &counts, i_half)
        .ok_or(LabError::NoHalfValueCrossing { i_half })?;
    if hvl_cm <= 0.0 {
        return Err(LabError::InvalidInput(format!(
            "half-value layer must be positive, got {hvl_cm}"
        )));
    }
    let (mu, mu_mass) = attenuation_coefficients(hvl_cm, dataset.density_g_cm3);

    log::debug!(
        "{}: I0 = {i0}, I_half = {i_half}, HVL = {hvl_cm} cm",
        dataset.material
    );

    Ok(HvlReport {
        material: dataset.material.clone(),
        net_counts: counts,
        i0,
        i_half,
        hvl_cm,
        mu,
        mu_mass,
    })
}

impl fmt::Display for HvlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial Counts I0 = {}", self.i0)?;
        writeln!(f, "Half Counts = {:.1}", self.i_half)?;
        writeln!(f, "HVL = {} cm", self.hvl_cm)?;
        writeln!(f, "Linear attenuation coefficient mu = {} cm^-1", self.mu)?;
        write!(f, "Mass attenuation coefficient = {} cm^2/g", self.mu_mass)
    }
}
