// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREEN_700, ORANGE, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1024;
pub const PLOT_HEIGHT: u32 = 768;

// Font sizes.
pub const FONT_SIZE_CHART_TITLE: i32 = 24;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 16;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const LINE_WIDTH_REFERENCE: u32 = 2;

// Marker half-size in pixels.
pub const MARKER_SIZE_PX: i32 = 5;

// Number of dashes drawn along a dashed series or reference line.
pub const DASH_COUNT: usize = 40;

// --- Plot Color Assignments ---
pub const COLOR_EXPECTED: &RGBColor = &BLUE;
pub const COLOR_OBSERVED: &RGBColor = &ORANGE;
pub const COLOR_BEST_FIT: &RGBColor = &GREEN_700;
pub const COLOR_DATA: &RGBColor = &BLUE;
pub const COLOR_HALF_COUNT: &RGBColor = &RED;
pub const COLOR_HVL: &RGBColor = &GREEN_700;
pub const COLOR_IV_CURVE: &RGBColor = &BLUE;

// --- DAC ---
pub const DAC_REFERENCE_VOLTAGE: f64 = 5.0; // Volts
pub const MAX_DAC_BITS: u32 = 31;

// --- Attenuation (aluminium) ---
pub const ATTENUATION_BACKGROUND_COUNTS: f64 = 1555.0;
pub const ALUMINIUM_DENSITY_G_CM3: f64 = 2.7;
pub const ALUMINIUM_LITERATURE_MU_CM: f64 = 0.2024;
pub const ALUMINIUM_LITERATURE_MU_MASS_RANGE: (f64, f64) = (0.07, 0.08); // cm^2/g
pub const HVL_PLOT_FILE: &str = "HVL_Aluminium.png";

// --- Solar cell ---
pub const SOLAR_FILTERS: [&str; 5] = [
    "No Filter",
    "Yellow Filter",
    "Green Filter",
    "Pink Filter",
    "Blue Filter",
];
pub const MILLIAMPS_PER_AMP: f64 = 1000.0;
// (input file, dataset title)
pub const SOLAR_DATASETS: [(&str, &str); 2] = [
    ("iv_in_lamp.csv", "Lamp Illumination"),
    ("iv_in_sunlight.csv", "Sunlight Illumination"),
];
pub const SOLAR_IMAGE_DIR: &str = "Images";

// src/constants.rs
