//! Domain models for resistor divider selection.
//!
//! This module contains the core domain types: resistances and their
//! shorthand notation, the standard series, candidate sets, configuration and
//! the divider search itself.

/// Resistance values and shorthand parsing.
pub mod resistance;
pub use resistance::{InvalidValueError, Ohms, parse_value};

pub mod series;
pub use series::{InvalidStandardNameError, StandardSeries};

mod candidates;
pub use candidates::{CandidateSet, Decades, DecadesOutOfRangeError, ParseDecadesError};

mod config;
pub use config::{Config, Error as ConfigError};

pub mod divider;
pub use divider::{Divider, DividerResult, Error as DividerError, pick_best, snap_to_nearest};
