//! Scenarios
//!
//! A scenario describes the films, showtimes and reservations used to
//! populate a catalog, loaded from YAML.

use std::{fs, path::Path, str::FromStr};

use cinema::{
    catalog::Catalog, pricing::Adjustment, records::RecordError, store::CinemaStore,
    strategies::CreationStrategy,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Scenario embedded in the binary.
pub const BUILTIN_SCENARIO: &str = include_str!("../scenarios/demo.yml");

/// Scenario loading errors
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// IO error reading the scenario file
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Malformed flat record
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// A catalog scenario.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Films added by the administrator
    #[serde(default)]
    pub films: Vec<FilmEntry>,

    /// Showtime records, `filmId;datetime;room;totalSeats`
    #[serde(default)]
    pub showtimes: Vec<String>,

    /// Reservation requests, `showtimeId;customerId;seatNumber;price`
    #[serde(default)]
    pub reservations: Vec<String>,

    /// Film identifiers whose schedule the demo prints
    #[serde(default)]
    pub schedule: Vec<String>,

    /// Ticket tiers compared side by side in the demo
    pub showcase: Option<Showcase>,
}

/// A film record and the tier it is created under.
#[derive(Debug, Deserialize)]
pub struct FilmEntry {
    /// Flat film record
    pub record: String,

    /// Creation tier, standard when omitted
    #[serde(default)]
    pub strategy: StrategyEntry,
}

/// Creation tier as written in YAML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyEntry {
    /// No adjustment
    #[default]
    Standard,

    /// Surcharge tier
    Vip(VipEntry),

    /// Discount tier
    Promotional(PromotionEntry),
}

/// VIP tier settings.
#[derive(Debug, Clone, Deserialize)]
pub struct VipEntry {
    /// Surcharge amount, e.g. `"15.00"`
    pub surcharge: String,

    /// Extras included in the tier
    #[serde(default)]
    pub extras: Vec<String>,
}

/// Promotional tier settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionEntry {
    /// Percentage off
    pub percent: u32,

    /// Promotion name
    pub label: String,
}

/// A film record priced under several tiers for comparison.
#[derive(Debug, Deserialize)]
pub struct Showcase {
    /// Flat film record
    pub record: String,

    /// VIP settings
    pub vip: VipEntry,

    /// Promotion settings
    pub promotion: PromotionEntry,
}

impl VipEntry {
    /// Parse the surcharge amount.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::InvalidPrice`] if the amount is not a decimal.
    pub fn surcharge(&self) -> Result<Decimal, ScenarioError> {
        parse_amount(&self.surcharge)
    }

    /// The surcharge adjustment for this tier.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::InvalidPrice`] if the amount is not a decimal.
    pub fn adjustment(&self) -> Result<Adjustment, ScenarioError> {
        Ok(Adjustment::surcharge(self.surcharge()?, self.extras.iter().cloned()))
    }
}

impl PromotionEntry {
    /// The discount adjustment for this tier.
    pub fn adjustment(&self) -> Adjustment {
        Adjustment::discount(self.percent, self.label.clone())
    }
}

impl TryFrom<&StrategyEntry> for CreationStrategy {
    type Error = ScenarioError;

    fn try_from(entry: &StrategyEntry) -> Result<Self, Self::Error> {
        Ok(match entry {
            StrategyEntry::Standard => CreationStrategy::Standard,
            StrategyEntry::Vip(vip) => CreationStrategy::Vip {
                surcharge: vip.surcharge()?,
                extras: vip.extras.iter().cloned().collect(),
            },
            StrategyEntry::Promotional(promotion) => CreationStrategy::Promotional {
                percent: promotion.percent,
                label: promotion.label.clone(),
            },
        })
    }
}

/// Parse a decimal amount, keeping its written scale.
///
/// # Errors
///
/// Returns [`ScenarioError::InvalidPrice`] if the amount is not a decimal.
pub fn parse_amount(amount: &str) -> Result<Decimal, ScenarioError> {
    Decimal::from_str(amount)
        .map_err(|error| ScenarioError::InvalidPrice(format!("{amount}: {error}")))
}

impl Scenario {
    /// Parse a scenario from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Yaml`] if the document is not a valid scenario.
    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a scenario file, or the built-in scenario when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ScenarioError> {
        match path {
            Some(path) => Self::from_yaml(&fs::read_to_string(path)?),
            None => Self::from_yaml(BUILTIN_SCENARIO),
        }
    }

    /// Add the scenario's films to the catalog, returning one message per film.
    ///
    /// # Errors
    ///
    /// Returns an error if a tier or film record is malformed.
    pub fn add_films<S: CinemaStore>(
        &self,
        catalog: &mut Catalog<S>,
    ) -> Result<Vec<String>, ScenarioError> {
        self.films
            .iter()
            .map(|film| -> Result<String, ScenarioError> {
                let strategy = CreationStrategy::try_from(&film.strategy)?;

                Ok(catalog.add_film(&film.record, &strategy)?)
            })
            .collect()
    }

    /// Add the scenario's showtimes to the catalog, returning one message per showtime.
    ///
    /// # Errors
    ///
    /// Returns an error if a showtime record is malformed.
    pub fn add_showtimes<S: CinemaStore>(
        &self,
        catalog: &mut Catalog<S>,
    ) -> Result<Vec<String>, ScenarioError> {
        self.showtimes
            .iter()
            .map(|record| -> Result<String, ScenarioError> { Ok(catalog.add_showtime(record)?) })
            .collect()
    }

    /// Submit the scenario's reservation requests, returning one message per request.
    ///
    /// # Errors
    ///
    /// Returns an error if a request is malformed.
    pub fn reserve<S: CinemaStore>(
        &self,
        catalog: &mut Catalog<S>,
    ) -> Result<Vec<String>, ScenarioError> {
        self.reservations
            .iter()
            .map(|request| -> Result<String, ScenarioError> { Ok(catalog.reserve_seat(request)?) })
            .collect()
    }

    /// Apply the whole scenario to a catalog.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a film, showtime or reservation.
    pub fn populate<S: CinemaStore>(&self, catalog: &mut Catalog<S>) -> Result<(), ScenarioError> {
        self.add_films(catalog)?;
        self.add_showtimes(catalog)?;
        self.reserve(catalog)?;

        Ok(())
    }
}
