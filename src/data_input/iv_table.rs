// src/data_input/iv_table.rs

use csv::{ReaderBuilder, StringRecord};
use ndarray::Array1;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::constants::MILLIAMPS_PER_AMP;
use crate::error::{LabError, Result};

/// Paired voltage/current samples of one filter condition, plus the derived
/// power curve.
#[derive(Debug, Clone)]
pub struct IvSamples {
    pub voltage: Array1<f64>, // V
    pub current: Array1<f64>, // A
    pub power: Array1<f64>,   // W
}

impl IvSamples {
    pub fn new(voltage: Array1<f64>, current: Array1<f64>) -> Self {
        let power = &voltage * &current;
        Self {
            voltage,
            current,
            power,
        }
    }

    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
}

/// A solar-cell measurement sheet: one header row naming `"<Filter> (I)"` /
/// `"<Filter> (V)"` columns, one units row, then data rows.
#[derive(Debug, Clone)]
pub struct IvTable {
    pub title: String,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl IvTable {
    /// Reads the table from disk.
    pub fn from_path(path: &Path, title: &str) -> Result<Self> {
        let file = File::open(path).map_err(|source| LabError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file), title)?;
        log::info!(
            "Read {} data rows from '{}' ({title}).",
            table.rows.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, title: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // The first record under the header holds the units.
        let rows = reader
            .records()
            .skip(1)
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        Ok(Self {
            title: title.to_string(),
            headers,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| LabError::MissingColumn {
                column: column.to_string(),
                source_name: self.title.clone(),
            })
    }

    /// Extracts the samples of one filter, current converted from mA to A.
    ///
    /// Rows where either cell is missing or not a number are dropped from
    /// both sequences.
    pub fn filter_samples(&self, filter: &str) -> Result<IvSamples> {
        let current_idx = self.column_index(&format!("{filter} (I)"))?;
        let voltage_idx = self.column_index(&format!("{filter} (V)"))?;

        let mut voltage = Vec::with_capacity(self.rows.len());
        let mut current = Vec::with_capacity(self.rows.len());
        let mut dropped = 0usize;

        for record in &self.rows {
            match (
                parse_cell(record, current_idx),
                parse_cell(record, voltage_idx),
            ) {
                (Some(i_ma), Some(v)) => {
                    current.push(i_ma / MILLIAMPS_PER_AMP);
                    voltage.push(v);
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            log::warn!(
                "{} / {filter}: dropped {dropped} row(s) with missing or non-numeric values",
                self.title
            );
        }

        Ok(IvSamples::new(
            Array1::from_vec(voltage),
            Array1::from_vec(current),
        ))
    }
}

fn parse_cell(record: &StringRecord, idx: usize) -> Option<f64> {
    record
        .get(idx)
        .and_then(|val_str| val_str.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SHEET: &str = "\
 No Filter (I) , No Filter (V) ,Blue Filter (I),Blue Filter (V)
mA,V,mA,V
10.0,0.0,5.0,0.0
8.0,0.3,abc,0.2
0.0,0.5,0.0,0.4
";

    #[test]
    fn test_headers_are_trimmed_and_units_row_skipped() {
        let table = IvTable::from_reader(SHEET.as_bytes(), "Lamp").unwrap();
        assert_eq!(table.headers()[0], "No Filter (I)");
        let samples = table.filter_samples("No Filter").unwrap();
        assert_eq!(samples.len(), 3);
    }

    #[test]
    fn test_current_converted_to_amps() {
        let table = IvTable::from_reader(SHEET.as_bytes(), "Lamp").unwrap();
        let samples = table.filter_samples("No Filter").unwrap();
        assert_abs_diff_eq!(samples.current[0], 0.010, epsilon = 1e-15);
        assert_abs_diff_eq!(samples.current[1], 0.008, epsilon = 1e-15);
        assert_abs_diff_eq!(samples.power[1], 0.3 * 0.008, epsilon = 1e-15);
    }

    #[test]
    fn test_non_numeric_current_drops_whole_row() {
        let table = IvTable::from_reader(SHEET.as_bytes(), "Lamp").unwrap();
        let samples = table.filter_samples("Blue Filter").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.voltage.to_vec(), vec![0.0, 0.4]);
        assert_eq!(samples.current.len(), samples.voltage.len());
    }

    #[test]
    fn test_short_rows_and_nan_are_missing() {
        let sheet = "A (I),A (V)\nmA,V\n1.0,0.1\n2.0\nnan,0.3\n4.0,0.4\n";
        let table = IvTable::from_reader(sheet.as_bytes(), "t").unwrap();
        let samples = table.filter_samples("A").unwrap();
        assert_eq!(samples.voltage.to_vec(), vec![0.1, 0.4]);
    }

    #[test]
    fn test_missing_column() {
        let table = IvTable::from_reader(SHEET.as_bytes(), "Lamp").unwrap();
        let err = table.filter_samples("Pink Filter").unwrap_err();
        match err {
            LabError::MissingColumn { column, source_name } => {
                assert_eq!(column, "Pink Filter (I)");
                assert_eq!(source_name, "Lamp");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = IvTable::from_path(Path::new("/nonexistent/iv.csv"), "x").unwrap_err();
        assert!(matches!(err, LabError::Io { .. }));
    }
}
