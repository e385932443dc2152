// src/data_input/attenuation_data.rs

use ndarray::{array, Array1};

use crate::constants::{ALUMINIUM_DENSITY_G_CM3, ATTENUATION_BACKGROUND_COUNTS};

/// Gross counts recorded behind increasing absorber thickness.
#[derive(Debug, Clone)]
pub struct AttenuationDataset {
    pub material: String,
    pub thickness_cm: Array1<f64>,
    pub gross_counts: Array1<f64>,
    pub background: f64,
    pub density_g_cm3: f64,
}

/// Aluminium absorber series measured with the MCA.
pub fn aluminium_dataset() -> AttenuationDataset {
    AttenuationDataset {
        material: "Aluminium".to_string(),
        thickness_cm: array![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0],
        gross_counts: array![
            28587.0, 26077.0, 23702.0, 21255.0, 19630.0, 18028.0, 16242.0, 14828.0, 13310.0,
            12752.0, 11616.0, 10715.0, 9730.0
        ],
        background: ATTENUATION_BACKGROUND_COUNTS,
        density_g_cm3: ALUMINIUM_DENSITY_G_CM3,
    }
}
