use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{candidates::Decades, series::StandardSeries};

/// Defaults for a search, usually read from a TOML file.
///
/// Command-line flags take precedence over anything set here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The standard series used when no external catalog is given.
    standard: StandardSeries,

    /// The number of decades the candidate set spans.
    ///
    /// A value of 1 uses the published table as-is; each further decade adds
    /// the same values scaled by the next power of ten.
    decades: Decades,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            standard: StandardSeries::default(),
            decades: Decades::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(Error::Read)?;
        toml::from_str(&content).map_err(Error::Parse)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self).map_err(Error::Serialize)?;
        std::fs::write(path, content).map_err(Error::Write)
    }

    /// Returns the default standard series.
    #[must_use]
    pub const fn standard(&self) -> StandardSeries {
        self.standard
    }

    /// Returns the number of decades the candidate set spans.
    #[must_use]
    pub const fn decades(&self) -> Decades {
        self.decades
    }

    /// Sets the default standard series.
    pub const fn set_standard(&mut self, standard: StandardSeries) {
        self.standard = standard;
    }

    /// Sets the number of decades the candidate set spans.
    pub const fn set_decades(&mut self, decades: Decades) {
        self.decades = decades;
    }
}

/// Errors raised while reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be read.
    #[error("Failed to read config file")]
    Read(#[source] std::io::Error),

    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file")]
    Parse(#[source] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize config")]
    Serialize(#[source] toml::ser::Error),

    /// The file could not be written.
    #[error("Failed to write config file")]
    Write(#[source] std::io::Error),
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        standard: StandardSeries,

        #[serde(default)]
        decades: Decades,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { standard, decades } => Self { standard, decades },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            standard: config.standard,
            decades: config.decades,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nstandard = \"e24\"\ndecades = 3\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.standard(), StandardSeries::E24);
        assert_eq!(config.decades().get(), 3);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, Error::Read(_)));
        assert_eq!(error.to_string(), "Failed to read config file");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn load_unknown_series_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nstandard = \"E7\"\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
        assert_eq!(error.to_string(), "Failed to parse config file");
        let cause = std::error::Error::source(&error).unwrap().to_string();
        assert!(cause.contains("E7 is not a valid standard E series name"));
    }

    #[test]
    fn load_zero_decades_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndecades = 0\n").unwrap();

        assert!(matches!(
            Config::load(file.path()).unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[test]
    fn load_decades_above_limit_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndecades = 255\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
        let cause = std::error::Error::source(&error).unwrap().to_string();
        assert!(cause.contains("decades must be between 1 and 6, got 255"));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vdiv.toml");

        let mut config = Config::default();
        config.set_standard(StandardSeries::E96);
        config.set_decades(Decades::new(2).unwrap());
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("standard = \"E96\""));
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.standard(), StandardSeries::E6);
        assert_eq!(actual.decades().get(), 1);
    }
}
