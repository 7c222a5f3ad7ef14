//! CSV export row source
//!
//! Reads a "Download as CSV" export of the ledger sheet. The first line is
//! the header; rows may be shorter or longer than it.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::result::{Error, Result};
use crate::ports::{RowSource, Rows};

/// Ledger rows from a local CSV file
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read every record after the header as a row of strings.
pub fn read_rows<R: Read>(reader: R) -> Result<Rows> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

impl RowSource for CsvFileSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch_rows(&self) -> Result<Rows> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            Error::source(format!("Cannot open {}: {}", self.path.display(), e))
        })?;
        read_rows(std::io::BufReader::new(file))
    }
}
