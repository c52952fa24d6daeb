use std::path::PathBuf;

mod table;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use divider::{CatalogSource, Config, Decades, DividerResult, StandardSeries};
pub use terminal::Colorize;
use tracing::{debug, instrument};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Input voltage
    #[arg(short = 'i', long, value_name = "VOLTS", allow_negative_numbers = true)]
    vin: f64,

    /// Desired output voltage
    #[arg(short = 'o', long, value_name = "VOLTS", allow_negative_numbers = true)]
    vout: f64,

    /// Resistor value standard (E3, E6, E12, E24, E48, E96, E192)
    ///
    /// Defaults to the configured series, or E6.
    #[arg(short, long, value_name = "SERIES")]
    standard: Option<String>,

    /// Resistor value file
    ///
    /// A comma separated table of values such as `4.7K` or `1M`. Replaces the
    /// standard series entirely.
    #[arg(short, long, value_name = "CSV_FILE")]
    csv: Option<PathBuf>,

    /// Number of decades to spread the candidate values over
    ///
    /// 1 uses the values exactly as listed; 2 adds the same values ×10, and
    /// so on, up to 6.
    #[arg(short, long, value_name = "N")]
    decades: Option<Decades>,

    /// Configuration file with default settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let best = self.search()?;

        match self.output {
            OutputFormat::Table => {
                if terminal::is_narrow() {
                    print!("{}", table::render_stacked(&best));
                } else {
                    print!("{}", table::render(&best));
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&best)?),
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn search(&self) -> anyhow::Result<DividerResult> {
        let config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => Config::default(),
        };
        debug!(?config, "resolved configuration");

        let source = self.catalog_source(&config)?;
        let decades = self.decades.unwrap_or_else(|| config.decades());

        Ok(divider::find_best(self.vin, self.vout, &source, decades)?)
    }

    /// An explicit catalog file wins over any series.
    fn catalog_source(&self, config: &Config) -> anyhow::Result<CatalogSource> {
        let series = match &self.standard {
            Some(name) => name.parse::<StandardSeries>()?,
            None => config.standard(),
        };

        Ok(self
            .csv
            .clone()
            .map_or(CatalogSource::Standard(series), CatalogSource::File))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vdiv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn voltages_are_required() {
        assert!(Cli::try_parse_from(["vdiv", "--vin", "5"]).is_err());
        assert!(Cli::try_parse_from(["vdiv", "--vout", "3.3"]).is_err());
    }

    #[test]
    fn defaults_to_e6() {
        let cli = parse(&["-i", "5", "-o", "3.3"]);
        let source = cli.catalog_source(&Config::default()).unwrap();
        assert_eq!(source, CatalogSource::Standard(StandardSeries::E6));
    }

    #[test]
    fn standard_flag_is_case_insensitive() {
        let cli = parse(&["-i", "5", "-o", "3.3", "-s", "e24"]);
        let source = cli.catalog_source(&Config::default()).unwrap();
        assert_eq!(source, CatalogSource::Standard(StandardSeries::E24));
    }

    #[test]
    fn unknown_standard_is_an_error() {
        let cli = parse(&["-i", "5", "-o", "3.3", "-s", "E7"]);
        let error = cli.catalog_source(&Config::default()).unwrap_err();
        assert_eq!(error.to_string(), "E7 is not a valid standard E series name");
    }

    #[test]
    fn csv_overrides_standard() {
        let cli = parse(&["-i", "5", "-o", "3.3", "-s", "E24", "-c", "values.csv"]);
        let source = cli.catalog_source(&Config::default()).unwrap();
        assert_eq!(source, CatalogSource::File(PathBuf::from("values.csv")));
    }

    #[test]
    fn config_standard_applies_without_flag() {
        let mut config = Config::default();
        config.set_standard(StandardSeries::E96);

        let cli = parse(&["-i", "5", "-o", "3.3"]);
        assert_eq!(
            cli.catalog_source(&config).unwrap(),
            CatalogSource::Standard(StandardSeries::E96)
        );

        let cli = parse(&["-i", "5", "-o", "3.3", "-s", "E3"]);
        assert_eq!(
            cli.catalog_source(&config).unwrap(),
            CatalogSource::Standard(StandardSeries::E3)
        );
    }

    #[test]
    fn zero_decades_is_rejected() {
        assert!(Cli::try_parse_from(["vdiv", "-i", "5", "-o", "3.3", "-d", "0"]).is_err());
    }

    #[test]
    fn decades_above_limit_are_rejected() {
        let error = Cli::try_parse_from(["vdiv", "-i", "5", "-o", "3.3", "-d", "255"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(error.to_string().contains("decades must be between 1 and 6, got 255"));

        let cli = parse(&["-i", "5", "-o", "3.3", "-d", "6"]);
        assert_eq!(cli.decades, Some(Decades::MAX));
    }

    #[test]
    fn negative_voltages_parse() {
        let cli = parse(&["-i", "5", "-o", "-1"]);
        assert_eq!(cli.vout, -1.0);
    }
}
