//! Candidate sets from a standard series or a catalog file.
//!
//! A catalog file is a flat comma separated table with no header row. Every
//! cell of every row is read as a resistor value token, and cells may be
//! quoted the way spreadsheet exports write them:
//!
//! ```text
//! 100, 220, 470
//! 1K, 2.2K, 4.7K
//! "1M","2.2M"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::domain::{CandidateSet, InvalidValueError, Ohms, StandardSeries, parse_value};

/// Where candidate resistor values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The published values of a standard series.
    Standard(StandardSeries),
    /// A catalog file on disk.
    File(PathBuf),
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::Standard(StandardSeries::default())
    }
}

/// Loads the candidate set described by `source`.
///
/// # Errors
///
/// Standard series never fail. Catalog files fail if they cannot be found or
/// read, if any cell is not a valid resistor value, or if they hold no
/// values at all.
#[instrument(level = "debug")]
pub fn load_catalog(source: &CatalogSource) -> Result<CandidateSet, Error> {
    match source {
        CatalogSource::Standard(series) => Ok(CandidateSet::from_series(*series)),
        CatalogSource::File(path) => load_file(path),
    }
}

fn load_file(path: &Path) -> Result<CandidateSet, Error> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let values = parse_table(&content).map_err(|error| match error {
        TableError::Malformed(source) => Error::Malformed {
            path: path.to_path_buf(),
            source,
        },
        TableError::InvalidValue { line, source } => Error::InvalidValue {
            path: path.to_path_buf(),
            line,
            source,
        },
    })?;
    debug!(count = values.len(), path = %path.display(), "parsed catalog");

    CandidateSet::new(values).ok_or_else(|| Error::Empty(path.to_path_buf()))
}

enum TableError {
    Malformed(csv::Error),
    InvalidValue { line: u64, source: InvalidValueError },
}

/// Parses every cell of a comma separated table.
///
/// Rows may have any number of cells. Blank lines hold no cells and are
/// skipped.
fn parse_table(content: &str) -> Result<Vec<Ohms>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(TableError::Malformed)?;
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        for cell in &record {
            let value =
                parse_value(cell).map_err(|source| TableError::InvalidValue { line, source })?;
            values.push(value);
        }
    }
    Ok(values)
}

/// Errors that can occur when loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog file does not exist.
    #[error("{} was not found!", .0.display())]
    NotFound(PathBuf),

    /// The catalog file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// The catalog file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The catalog file holds no values.
    #[error("{} is empty! Add some resistor values.", .0.display())]
    Empty(PathBuf),

    /// The catalog file is not a readable comma separated table.
    #[error("{} is not a valid comma separated table", path.display())]
    Malformed {
        /// The catalog file.
        path: PathBuf,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// A cell of the catalog is not a resistor value.
    #[error("{}:{line}", path.display())]
    InvalidValue {
        /// The catalog file.
        path: PathBuf,
        /// The 1-based line holding the bad cell.
        line: u64,
        /// The parse failure.
        source: InvalidValueError,
    },
}
