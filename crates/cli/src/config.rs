//! CLI configuration

use std::path::PathBuf;

use cinema::strategies::CreationStrategy;
use clap::{Args, Parser, Subcommand};

use crate::scenario::{ScenarioError, parse_amount};

/// Cinema catalog command-line harness
#[derive(Debug, Parser)]
#[command(name = "cinema-cli", about = "Cinema catalog CLI", long_about = None)]
pub struct CliConfig {
    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// YAML scenario used to populate the catalog; the built-in demo
    /// scenario is used when omitted
    #[arg(short, long, env = "CINEMA_SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk through the scenario: films, showtimes, schedule, reservations
    /// and ticket pricing
    Demo,

    /// Print the schedule for a film
    Schedule {
        /// Film identifier
        film_id: String,
    },

    /// Reserve seats from `showtimeId;customerId;seatNumber;price` requests
    Reserve {
        /// Reservation requests, processed in order
        #[arg(required = true)]
        requests: Vec<String>,
    },

    /// Print the free seats of a showtime
    Seats {
        /// Showtime identifier
        showtime_id: String,
    },

    /// Add a film from an `id;title;description;durationMinutes;genre;basePrice` record
    AddFilm(AddFilmArgs),
}

/// Arguments for adding a film.
#[derive(Debug, Args)]
pub struct AddFilmArgs {
    /// Flat film record
    pub record: String,

    /// Price the film as VIP with this surcharge
    #[arg(long, conflicts_with = "promo_percent")]
    pub vip_surcharge: Option<String>,

    /// Extra included in the VIP tier (repeatable)
    #[arg(long = "extra", requires = "vip_surcharge")]
    pub extras: Vec<String>,

    /// Price the film as a promotion with this percentage off
    #[arg(long, requires = "promo_label")]
    pub promo_percent: Option<u32>,

    /// Promotion name
    #[arg(long, requires = "promo_percent")]
    pub promo_label: Option<String>,
}

impl AddFilmArgs {
    /// Creation tier selected by the flags, standard when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::InvalidPrice`] if the VIP surcharge is not a decimal.
    pub fn strategy(&self) -> Result<CreationStrategy, ScenarioError> {
        if let Some(surcharge) = &self.vip_surcharge {
            return Ok(CreationStrategy::Vip {
                surcharge: parse_amount(surcharge)?,
                extras: self.extras.iter().cloned().collect(),
            });
        }

        match (self.promo_percent, &self.promo_label) {
            (Some(percent), Some(label)) => Ok(CreationStrategy::Promotional {
                percent,
                label: label.clone(),
            }),
            _ => Ok(CreationStrategy::Standard),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_reserve_with_several_requests() -> TestResult {
        let config = CliConfig::try_parse_from([
            "cinema-cli",
            "reserve",
            "S1;K001;1;25.50",
            "S1;K002;2;25.50",
        ])?;

        let Command::Reserve { requests } = config.command else {
            return Err("expected reserve command".into());
        };

        assert_eq!(requests, ["S1;K001;1;25.50", "S1;K002;2;25.50"]);

        Ok(())
    }

    #[test]
    fn parses_vip_film_with_extras() -> TestResult {
        let config = CliConfig::try_parse_from([
            "cinema-cli",
            "--log-format",
            "json",
            "add-film",
            "9;Dune;Desert epic;155;Sci-Fi;30.00",
            "--vip-surcharge",
            "12.50",
            "--extra",
            "Recliner",
            "--extra",
            "Snacks",
        ])?;

        assert_eq!(config.logging.log_format, LogFormat::Json);

        let Command::AddFilm(args) = config.command else {
            return Err("expected add-film command".into());
        };

        assert_eq!(args.vip_surcharge.as_deref(), Some("12.50"));
        assert_eq!(args.extras, ["Recliner", "Snacks"]);
        assert_eq!(args.promo_percent, None);
        assert_eq!(args.strategy()?.name(), "vip");

        Ok(())
    }

    #[test]
    fn add_film_defaults_to_standard_tier() -> TestResult {
        let config =
            CliConfig::try_parse_from(["cinema-cli", "add-film", "9;Dune;Desert epic;155;Sci-Fi;30.00"])?;

        let Command::AddFilm(args) = config.command else {
            return Err("expected add-film command".into());
        };

        assert_eq!(args.strategy()?, CreationStrategy::Standard);

        Ok(())
    }

    #[test]
    fn add_film_builds_promotional_tier() -> TestResult {
        let config = CliConfig::try_parse_from([
            "cinema-cli",
            "add-film",
            "9;Dune;Desert epic;155;Sci-Fi;30.00",
            "--promo-percent",
            "15",
            "--promo-label",
            "Matinee",
        ])?;

        let Command::AddFilm(args) = config.command else {
            return Err("expected add-film command".into());
        };

        assert_eq!(
            args.strategy()?,
            CreationStrategy::Promotional {
                percent: 15,
                label: "Matinee".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn promotion_requires_a_label() {
        let result = CliConfig::try_parse_from([
            "cinema-cli",
            "add-film",
            "9;Dune;Desert epic;155;Sci-Fi;30.00",
            "--promo-percent",
            "15",
        ]);

        assert!(result.is_err(), "expected a missing label to be rejected");
    }

    #[test]
    fn rejects_vip_and_promotion_together() {
        let result = CliConfig::try_parse_from([
            "cinema-cli",
            "add-film",
            "9;Dune;Desert epic;155;Sci-Fi;30.00",
            "--vip-surcharge",
            "12.50",
            "--promo-percent",
            "10",
            "--promo-label",
            "Matinee",
        ]);

        assert!(result.is_err(), "expected conflicting tiers to be rejected");
    }
}
