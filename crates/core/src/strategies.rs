//! Film Creation Strategies

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    films::Film,
    pricing::{Adjustment, PricedFilm, PricingError},
    records::{RecordError, RecordKind},
};

/// How an administrator prices a newly added film.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CreationStrategy {
    /// Base price, no annotation.
    #[default]
    Standard,

    /// Premium tier: a fixed surcharge plus listed extras.
    Vip {
        /// Amount added to the base price
        surcharge: Decimal,

        /// Extras included in the tier
        extras: SmallVec<[String; 4]>,
    },

    /// Promotional tier: a percentage off the base price.
    Promotional {
        /// Percentage off
        percent: u32,

        /// Promotion name
        label: String,
    },
}

impl CreationStrategy {
    /// Build a priced film from a flat film record.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the record is malformed, or
    /// [`RecordError::InvalidValue`] if the base price is too large to adjust.
    pub fn create_item(&self, record: &str) -> Result<PricedFilm, RecordError> {
        let film = PricedFilm::new(Film::from_record(record)?);

        match self.adjustment() {
            Some(adjustment) => film.then(adjustment).map_err(|error| match error {
                PricingError::Overflow { price } => RecordError::InvalidValue {
                    kind: RecordKind::Film,
                    field: "basePrice",
                    value: price.to_string(),
                },
            }),
            None => Ok(film),
        }
    }

    /// The adjustment this strategy layers over the base film, if any.
    pub fn adjustment(&self) -> Option<Adjustment> {
        match self {
            CreationStrategy::Standard => None,
            CreationStrategy::Vip { surcharge, extras } => Some(Adjustment::Surcharge {
                amount: *surcharge,
                extras: extras.clone(),
            }),
            CreationStrategy::Promotional { percent, label } => {
                Some(Adjustment::discount(*percent, label.clone()))
            }
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CreationStrategy::Standard => "standard",
            CreationStrategy::Vip { .. } => "vip",
            CreationStrategy::Promotional { .. } => "promotional",
        }
    }
}
