use std::{fmt, str::FromStr};

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use super::{resistance::Ohms, series::StandardSeries};

/// How many decades a candidate set spans, between 1 and [`Decades::MAX`].
///
/// Every pair of candidates is evaluated, so the search grows with the square
/// of the set size. The upper bound keeps even E192 in the low thousands of
/// candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decades(u8);

impl Decades {
    /// The published table only.
    pub const ONE: Self = Self(1);

    /// The widest allowed spread.
    pub const MAX: Self = Self(6);

    /// Creates a decade count.
    ///
    /// # Errors
    ///
    /// Returns [`DecadesOutOfRangeError`] unless `1 <= decades <= 6`.
    pub const fn new(decades: u8) -> Result<Self, DecadesOutOfRangeError> {
        if decades >= Self::ONE.0 && decades <= Self::MAX.0 {
            Ok(Self(decades))
        } else {
            Err(DecadesOutOfRangeError(decades))
        }
    }

    /// Returns the number of decades.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Decades {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Decades {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Decades {
    type Error = DecadesOutOfRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decades> for u8 {
    fn from(decades: Decades) -> Self {
        decades.0
    }
}

impl FromStr for Decades {
    type Err = ParseDecadesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| ParseDecadesError::NotANumber(s.to_string()))?;
        Ok(Self::new(value)?)
    }
}

/// Error returned when a decade count is outside the supported range.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("decades must be between 1 and {max}, got {0}", max = Decades::MAX.0)]
pub struct DecadesOutOfRangeError(u8);

/// Error returned when a decade count cannot be parsed from text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseDecadesError {
    /// The text is not a whole number from 0 to 255.
    #[error("{0} is not a whole number of decades")]
    NotANumber(String),

    /// The number is outside the supported range.
    #[error(transparent)]
    OutOfRange(#[from] DecadesOutOfRangeError),
}

/// The resistor values available to a search.
///
/// A candidate set is never empty. Values keep the order they were supplied
/// in, and duplicates are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    values: NonEmpty<Ohms>,
}

impl CandidateSet {
    /// Creates a candidate set, returning `None` if `values` is empty.
    #[must_use]
    pub fn new(values: Vec<Ohms>) -> Option<Self> {
        NonEmpty::from_vec(values).map(|values| Self { values })
    }

    /// The published values of a standard series, verbatim.
    #[must_use]
    pub fn from_series(series: StandardSeries) -> Self {
        let values = NonEmpty::from_vec(series.values().collect())
            .expect("standard series tables are never empty");
        Self { values }
    }

    /// Repeats the set once per decade, multiplying by successive powers of
    /// ten.
    ///
    /// One decade returns the set unchanged. Each additional decade appends
    /// a copy of the original values scaled by the next power of ten.
    #[must_use]
    pub fn with_decades(self, decades: Decades) -> Self {
        let mut values = self.values.clone();
        let mut scale = 1.0;
        for _ in 1..decades.get() {
            scale *= 10.0;
            for value in self.values.iter() {
                values.push(Ohms::from_raw(value.get() * scale));
            }
        }
        Self { values }
    }

    /// The number of values in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a candidate set holds at least one value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The values, in order.
    pub fn iter(&self) -> impl Iterator<Item = Ohms> + '_ {
        self.values.iter().copied()
    }
}
