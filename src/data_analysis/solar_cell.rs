// src/data_analysis/solar_cell.rs

use std::fmt;

use ndarray::Array1;
use ndarray_stats::QuantileExt; // argmin / argmax on Array1

use crate::data_input::iv_table::IvSamples;
use crate::error::{LabError, Result};

/// Characteristic points of one I-V curve.
#[derive(Debug, Clone, PartialEq)]
pub struct IvReport {
    pub filter: String,
    pub isc: f64,  // A
    pub voc: f64,  // V
    pub pmax: f64, // W
    pub vmp: f64,  // V
    pub imp: f64,  // A
    pub fill_factor: f64,
}

/// Index of the value closest to zero. Ties go to the first occurrence.
///
/// Returns `None` for an empty array or one containing NaN.
pub fn index_nearest_zero(values: &Array1<f64>) -> Option<usize> {
    values.mapv(f64::abs).argmin().ok()
}

/// Index of the largest value. Ties go to the first occurrence.
pub fn index_of_max(values: &Array1<f64>) -> Option<usize> {
    values.argmax().ok()
}

/// `Pmax / (Voc * Isc)`.
pub fn fill_factor(pmax: f64, voc: f64, isc: f64) -> Result<f64> {
    let denom = voc * isc;
    if denom == 0.0 || !denom.is_finite() {
        return Err(LabError::InvalidInput(format!(
            "fill factor undefined for Voc = {voc}, Isc = {isc}"
        )));
    }
    Ok(pmax / denom)
}

pub fn analyze_iv(filter: &str, samples: &IvSamples) -> Result<IvReport> {
    if samples.voltage.len() != samples.current.len() {
        return Err(LabError::LengthMismatch {
            what: "I-V voltage vs current",
            left: samples.voltage.len(),
            right: samples.current.len(),
        });
    }
    if samples.is_empty() {
        return Err(LabError::InsufficientData {
            what: "I-V curve",
            needed: 1,
            found: 0,
        });
    }

    let undefined = || LabError::InvalidInput(format!("{filter}: I-V samples contain NaN"));

    // Isc sits where V is closest to zero, Voc where I is closest to zero.
    let isc = samples.current[index_nearest_zero(&samples.voltage).ok_or_else(undefined)?];
    let voc = samples.voltage[index_nearest_zero(&samples.current).ok_or_else(undefined)?];

    let mpp = index_of_max(&samples.power).ok_or_else(undefined)?;
    let pmax = samples.power[mpp];

    Ok(IvReport {
        filter: filter.to_string(),
        isc,
        voc,
        pmax,
        vmp: samples.voltage[mpp],
        imp: samples.current[mpp],
        fill_factor: fill_factor(pmax, voc, isc)?,
    })
}

impl fmt::Display for IvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.filter)?;
        writeln!(f, "Isc  = {:.6} A", self.isc)?;
        writeln!(f, "Voc  = {:.6} V", self.voc)?;
        writeln!(f, "Pmax = {:.6} W", self.pmax)?;
        writeln!(f, "Vmp  = {:.6} V", self.vmp)?;
        writeln!(f, "Imp  = {:.6} A", self.imp)?;
        write!(f, "Fill Factor = {:.4}", self.fill_factor)
    }
}
