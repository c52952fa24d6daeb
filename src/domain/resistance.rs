use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

/// The power of ten a shorthand suffix stands for.
const fn shorthand_exponent(suffix: u8) -> u8 {
    match suffix.to_ascii_uppercase() {
        b'K' => 3,
        b'M' => 6,
        _ => 0,
    }
}

/// A plain decimal mantissa with at most one trailing shorthand suffix.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<mantissa>[0-9]+\.?[0-9]*|\.[0-9]+)(?<suffix>[KkMm])?$")
        .expect("token pattern is valid")
});

/// A resistance in ohms.
///
/// Values produced by [`parse_value`] or [`Ohms::new`] are always positive
/// and finite. [`Ohms::ZERO`] exists only as the "no candidate fits" result
/// of snapping an ideal value to a candidate set.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Ohms(f64);

impl Ohms {
    /// Zero ohms.
    pub const ZERO: Self = Self(0.0);

    /// Creates a resistance from a raw number of ohms.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidValueError`] if `ohms` is not a positive, finite
    /// number.
    pub fn new(ohms: f64) -> Result<Self, InvalidValueError> {
        if ohms.is_finite() && ohms > 0.0 {
            Ok(Self(ohms))
        } else {
            Err(InvalidValueError(ohms.to_string()))
        }
    }

    /// Used by the solver, whose inputs are already validated.
    pub(crate) const fn from_raw(ohms: f64) -> Self {
        Self(ohms)
    }

    /// Returns the resistance as a number of ohms.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Ohms {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ohms", self.0)
    }
}

impl FromStr for Ohms {
    type Err = InvalidValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s)
    }
}

/// Parses a resistor value token such as `47`, `4.7K` or `1m`.
///
/// A token is a non-negative decimal number, optionally followed by exactly
/// one case-insensitive shorthand suffix: `K` (×1 000) or `M` (×1 000 000).
/// Leading and trailing whitespace is ignored.
///
/// # Errors
///
/// Returns [`InvalidValueError`] if the token has any other shape (signs,
/// exponents, several suffixes, an empty string) or if it evaluates to zero
/// ohms.
///
/// # Examples
///
/// ```
/// use divider::domain::resistance::parse_value;
///
/// assert_eq!(parse_value("2.2K").unwrap().get(), 2200.0);
/// assert_eq!(parse_value("1M").unwrap().get(), 1_000_000.0);
/// assert!(parse_value("-5").is_err());
/// ```
pub fn parse_value(token: &str) -> Result<Ohms, InvalidValueError> {
    let trimmed = token.trim();
    let invalid = || InvalidValueError(trimmed.to_string());

    let captures = TOKEN_PATTERN.captures(trimmed).ok_or_else(invalid)?;
    let exponent = captures
        .name("suffix")
        .map_or(0, |suffix| shorthand_exponent(suffix.as_str().as_bytes()[0]));

    // Scaling in decimal keeps "2.2K" at exactly 2200 rather than 2.2 * 1000.
    let ohms: f64 = format!("{}e{exponent}", &captures["mantissa"])
        .parse()
        .map_err(|_| invalid())?;

    Ohms::new(ohms).map_err(|_| invalid())
}

/// Error returned when a token is not a valid resistor value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "{0} is not a valid resistor value! Only use positive numbers with an optional K or M \
     shorthand"
)]
pub struct InvalidValueError(String);

impl InvalidValueError {
    /// The offending token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("47", 47.0; "plain integer")]
    #[test_case("4.7", 4.7; "plain decimal")]
    #[test_case(".5", 0.5; "leading dot")]
    #[test_case("10.", 10.0; "trailing dot")]
    #[test_case("2.2K", 2_200.0; "kilo")]
    #[test_case("2.2k", 2_200.0; "lowercase kilo")]
    #[test_case("1M", 1_000_000.0; "mega")]
    #[test_case("4.7m", 4_700_000.0; "lowercase mega")]
    #[test_case("  330  ", 330.0; "surrounding whitespace")]
    fn parses_valid_tokens(token: &str, expected: f64) {
        assert_eq!(parse_value(token).unwrap().get(), expected);
    }

    #[test_case("-5"; "negative")]
    #[test_case("+5"; "explicit sign")]
    #[test_case("abc"; "letters")]
    #[test_case(""; "empty")]
    #[test_case("K"; "suffix only")]
    #[test_case("1KM"; "two suffixes")]
    #[test_case("2K2"; "embedded suffix")]
    #[test_case("1e3"; "exponent")]
    #[test_case("inf"; "infinity")]
    #[test_case("NaN"; "not a number")]
    #[test_case("1.2.3"; "two dots")]
    #[test_case("0"; "zero")]
    #[test_case("0K"; "zero with suffix")]
    fn rejects_invalid_tokens(token: &str) {
        assert_eq!(
            parse_value(token),
            Err(InvalidValueError(token.to_string()))
        );
    }

    #[test]
    fn from_str_matches_parse_value() {
        let ohms: Ohms = "10k".parse().unwrap();
        assert_eq!(ohms, parse_value("10K").unwrap());
    }

    #[test]
    fn new_rejects_non_positive() {
        assert!(Ohms::new(0.0).is_err());
        assert!(Ohms::new(-1.0).is_err());
        assert!(Ohms::new(f64::NAN).is_err());
        assert!(Ohms::new(f64::INFINITY).is_err());
        assert_eq!(Ohms::new(22.0).unwrap().get(), 22.0);
    }

    #[test]
    fn display_appends_unit() {
        assert_eq!(Ohms::new(10.0).unwrap().to_string(), "10 ohms");
        assert_eq!(Ohms::new(2200.5).unwrap().to_string(), "2200.5 ohms");
    }

    #[test]
    fn error_display() {
        let error = parse_value("abc").unwrap_err();
        assert_eq!(error.token(), "abc");
        assert_eq!(
            error.to_string(),
            "abc is not a valid resistor value! Only use positive numbers with an optional K or \
             M shorthand"
        );
    }
}
