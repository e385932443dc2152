// src/bin/hvl_attenuation.rs

use std::error::Error;
use std::path::Path;

use lab_reduction::constants::{
    ALUMINIUM_LITERATURE_MU_CM, ALUMINIUM_LITERATURE_MU_MASS_RANGE, HVL_PLOT_FILE,
};
use lab_reduction::data_analysis::attenuation::analyze_attenuation;
use lab_reduction::data_input::attenuation_data::aluminium_dataset;
use lab_reduction::plot_functions::plot_hvl::plot_hvl;

fn run() -> Result<(), Box<dyn Error>> {
    let dataset = aluminium_dataset();
    let report = analyze_attenuation(&dataset)?;

    println!("{report}");
    let (lit_lo, lit_hi) = ALUMINIUM_LITERATURE_MU_MASS_RANGE;
    println!(
        "Literature: mu ~ {ALUMINIUM_LITERATURE_MU_CM} cm^-1 (deviation {:+.2}%), mass coefficient {lit_lo} to {lit_hi} cm^2/g",
        report.mu_deviation_from(ALUMINIUM_LITERATURE_MU_CM) * 100.0
    );

    plot_hvl(Path::new(HVL_PLOT_FILE), &dataset, &report)?;
    Ok(())
}

fn main() {
    lab_reduction::init_logging();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
