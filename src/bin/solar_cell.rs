// src/bin/solar_cell.rs

use std::error::Error;
use std::path::Path;

use lab_reduction::constants::{SOLAR_DATASETS, SOLAR_FILTERS, SOLAR_IMAGE_DIR};
use lab_reduction::data_analysis::solar_cell::analyze_iv;
use lab_reduction::data_input::iv_table::IvTable;
use lab_reduction::plot_functions::plot_iv_curves::plot_iv_curves;

fn analyze_table(table: &IvTable, image_dir: &Path) -> Result<(), Box<dyn Error>> {
    println!("\n========== {} ==========", table.title);

    for filter in SOLAR_FILTERS {
        let samples = table.filter_samples(filter)?;
        let report = analyze_iv(filter, &samples)?;
        println!("\n{report}");

        plot_iv_curves(image_dir, &table.title, filter, &samples)?;
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let image_dir = Path::new(SOLAR_IMAGE_DIR);
    for (file, title) in SOLAR_DATASETS {
        let table = IvTable::from_path(Path::new(file), title)?;
        analyze_table(&table, image_dir)?;
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
