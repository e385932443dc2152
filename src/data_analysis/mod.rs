// src/data_analysis/mod.rs

pub mod attenuation;
pub mod dac;
pub mod linear_fit;
pub mod solar_cell;
