// src/plot_functions/mod.rs

pub mod plot_dac_transfer;
pub mod plot_hvl;
pub mod plot_iv_curves;
