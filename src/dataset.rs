//! Data providers: deterministic sources of the iris table.
//!
//! The embedded reference table is the default source; a previously saved CSV
//! can be substituted for inspection runs. The trait seam exists so tests can
//! inject fakes without touching the filesystem.

use crate::models::Record;
use crate::storage::{self, LoadError};
use log::{debug, info};
use std::path::PathBuf;

/// Embedded reference table (Fisher/Anderson iris data, 150 rows).
static IRIS_CSV: &str = include_str!("../data/iris.csv");

/// Anything that can produce a dataset.
pub trait DataProvider {
    fn produce(&self) -> Result<Vec<Record>, LoadError>;
}

/// The embedded 150-row reference dataset. Deterministic: no network, no
/// randomness, same rows every run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinIris;

impl DataProvider for BuiltinIris {
    fn produce(&self) -> Result<Vec<Record>, LoadError> {
        let records = storage::parse_csv_str(IRIS_CSV, "<builtin iris table>")?;
        debug!("built-in dataset parsed: {} records", records.len());
        Ok(records)
    }
}

/// Reload a dataset from a CSV written by [`crate::storage::save_csv`].
#[derive(Debug, Clone)]
pub struct CsvFileProvider {
    pub path: PathBuf,
}

impl CsvFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataProvider for CsvFileProvider {
    fn produce(&self) -> Result<Vec<Record>, LoadError> {
        let records = storage::load_csv(&self.path)?;
        info!(
            "loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
