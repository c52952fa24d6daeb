//! Voltage divider resistor selection
//!
//! Finds the pair of available resistor values whose divider output comes
//! closest to a target voltage.
//!
//! ```
//! use divider::{CatalogSource, Divider, StandardSeries, load_catalog};
//!
//! let candidates = load_catalog(&CatalogSource::Standard(StandardSeries::E6)).unwrap();
//! let best = Divider::new(5.0, 3.3).unwrap().best_match(&candidates);
//!
//! assert_eq!(best.r1.get(), 33.0);
//! assert_eq!(best.r2.get(), 68.0);
//! ```

use tracing::instrument;

pub mod domain;
pub use domain::{
    CandidateSet, Config, Decades, Divider, DividerResult, InvalidStandardNameError, InvalidValueError,
    Ohms, StandardSeries, parse_value,
};

/// Catalog loading from standard series and files.
pub mod storage;
pub use storage::{CatalogSource, load_catalog};

/// Anything that can stop a search before it produces a result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resistor value token could not be parsed.
    #[error(transparent)]
    InvalidValue(#[from] InvalidValueError),

    /// A series name is not a known standard series.
    #[error(transparent)]
    InvalidStandardName(#[from] InvalidStandardNameError),

    /// A catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] storage::CatalogError),

    /// The requested voltages do not describe a step-down divider.
    #[error(transparent)]
    Divider(#[from] domain::DividerError),

    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] domain::ConfigError),
}

/// Validates the voltages, loads the candidates and returns the best match.
///
/// The voltages are checked before the catalog is touched, so a bad request
/// never reads from disk.
///
/// # Errors
///
/// Returns an error if the voltages do not describe a step-down divider or
/// if the catalog cannot be loaded.
#[instrument(level = "debug")]
pub fn find_best(
    vin: f64,
    vout: f64,
    source: &CatalogSource,
    decades: Decades,
) -> Result<DividerResult, Error> {
    let divider = Divider::new(vin, vout)?;
    let candidates = load_catalog(source)?.with_decades(decades);
    Ok(divider.best_match(&candidates))
}
