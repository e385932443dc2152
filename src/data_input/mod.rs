// src/data_input/mod.rs

pub mod attenuation_data;
pub mod dac_data;
pub mod iv_table;
