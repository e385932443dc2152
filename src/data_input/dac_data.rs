// src/data_input/dac_data.rs

use ndarray::Array1;

/// One DAC transfer-curve measurement: every input code with the voltage
/// measured at the output of the inverting stage.
#[derive(Debug, Clone)]
pub struct DacDataset {
    pub title: String,
    pub bits: u32,
    pub codes: Array1<f64>,
    pub observed: Array1<f64>,
}

impl DacDataset {
    /// Builds a dataset from measured output magnitudes, one per code
    /// starting at 0. `analyze_dac` checks the codes against `2^bits`.
    ///
    /// The meter readings are entered as magnitudes; the inverting DAC drives
    /// a negative output, so they are negated here.
    pub fn from_magnitudes(bits: u32, magnitudes: &[f64]) -> Self {
        Self {
            title: format!("{bits}-bit DAC"),
            bits,
            codes: Array1::from_iter((0..magnitudes.len()).map(|d| d as f64)),
            observed: Array1::from_iter(magnitudes.iter().map(|v| -v)),
        }
    }

    /// Image file the transfer characteristic is saved to.
    pub fn plot_file_name(&self) -> String {
        format!("{}-bit.jpeg", self.bits)
    }
}

// Measured output magnitudes (V), one per input code.
const MAGNITUDES_3BIT: [f64; 8] = [-0.002, 1.312, 2.583, 3.898, 5.140, 6.450, 7.72, 9.04];

const MAGNITUDES_4BIT: [f64; 16] = [
    -0.002, 0.347, 1.304, 1.954, //
    2.572, 3.224, 3.884, 4.530, //
    5.14, 5.80, 6.45, 7.11, //
    7.72, 8.37, 9.03, 9.69,
];

pub fn three_bit_dataset() -> DacDataset {
    DacDataset::from_magnitudes(3, &MAGNITUDES_3BIT)
}

pub fn four_bit_dataset() -> DacDataset {
    DacDataset::from_magnitudes(4, &MAGNITUDES_4BIT)
}
