// src/bin/dac_analysis.rs

use std::error::Error;
use std::path::Path;

use lab_reduction::constants::DAC_REFERENCE_VOLTAGE;
use lab_reduction::data_analysis::dac::{analyze_dac, expected_output, DacConfig};
use lab_reduction::data_input::dac_data::{four_bit_dataset, three_bit_dataset};
use lab_reduction::plot_functions::plot_dac_transfer::plot_dac_transfer;

fn run() -> Result<(), Box<dyn Error>> {
    let datasets = [three_bit_dataset(), four_bit_dataset()];

    for ds in &datasets {
        println!("Observed_{}bit= {}", ds.bits, ds.observed);
    }
    for ds in &datasets {
        let expected = expected_output(&ds.codes, ds.bits, DAC_REFERENCE_VOLTAGE);
        println!("Expected_{}bit= {}", ds.bits, expected);
    }

    let mut reports = Vec::with_capacity(datasets.len());
    for ds in &datasets {
        let config = DacConfig::inverting(DAC_REFERENCE_VOLTAGE, ds.bits);
        let report = analyze_dac(ds, &config)?;
        println!("\n{report}");
        reports.push(report);
    }

    for (ds, report) in datasets.iter().zip(&reports) {
        plot_dac_transfer(Path::new(&ds.plot_file_name()), ds, report)?;
    }
    Ok(())
}

fn main() {
    lab_reduction::init_logging();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
