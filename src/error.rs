// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Every failure the reduction tools can report.
///
/// Unparseable numeric cells are not errors: the loader drops those rows and
/// logs how many it skipped.
#[derive(Debug, Error)]
pub enum LabError {
    /// Too few samples to compute a fit, an RMS value or a crossing.
    #[error("insufficient data for {what}: need at least {needed} samples, found {found}")]
    InsufficientData {
        what: &'static str,
        needed: usize,
        found: usize,
    },

    /// Two sequences that are analysed pairwise have different lengths.
    #[error("length mismatch in {what}: {left} vs {right} samples")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    /// All x values are identical, so the least-squares slope is undefined.
    #[error("degenerate linear fit: all x values are identical")]
    DegenerateFit,

    /// No adjacent pair of samples brackets the half count.
    #[error("no half-value crossing found: counts never fall through I_half = {i_half}")]
    NoHalfValueCrossing { i_half: f64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("column '{column}' not found in {source_name}")]
    MissingColumn { column: String, source_name: String },

    /// The directory an image should be written into does not exist.
    #[error("cannot write output: directory '{}' does not exist", .path.display())]
    OutputDirectory { path: PathBuf },

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("plot rendering failed: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, LabError>;
