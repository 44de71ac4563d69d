//! Pricing
//!
//! Ticket tiers are expressed as an ordered list of adjustments layered over
//! a base film. Adjustments apply left to right, so a surcharge followed by a
//! discount discounts the surcharge too, while the reverse order does not.

use std::{borrow::Cow, num::NonZeroU32};

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::films::{Film, PricedItem};

/// Errors raised while applying an adjustment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The adjusted price does not fit in a [`Decimal`].
    #[error("adjusting price {price} overflows")]
    Overflow {
        /// Price the adjustment was applied to
        price: Decimal,
    },
}

/// A single price and description adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adjustment {
    /// Add a fixed amount to the price and list the extras included.
    Surcharge {
        /// Amount added to the price
        amount: Decimal,

        /// Extras included with the surcharge, e.g. "Premium seats"
        extras: SmallVec<[String; 4]>,
    },

    /// Take a percentage off the price.
    ///
    /// A percent of 100 or more yields a zero or negative price. Keeping
    /// discounts below that is the caller's responsibility.
    Discount {
        /// Percentage off, e.g. `20` for 20% off
        percent: u32,

        /// Promotion name shown in the description
        label: String,
    },
}

impl Adjustment {
    /// Creates a surcharge adjustment.
    pub fn surcharge<I, S>(amount: Decimal, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Adjustment::Surcharge {
            amount,
            extras: extras.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a discount adjustment.
    pub fn discount(percent: u32, label: impl Into<String>) -> Self {
        Adjustment::Discount {
            percent,
            label: label.into(),
        }
    }

    /// Apply this adjustment to a price.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the result is out of range.
    pub fn apply(&self, price: Decimal) -> Result<Decimal, PricingError> {
        let adjusted = match self {
            Adjustment::Surcharge { amount, .. } => price.checked_add(*amount),
            Adjustment::Discount { percent, .. } => price
                .checked_mul(Decimal::ONE_HUNDRED - Decimal::from(*percent))
                .and_then(|price| price.checked_div(Decimal::ONE_HUNDRED)),
        };

        adjusted.ok_or(PricingError::Overflow { price })
    }

    /// Annotation appended to the description by this adjustment.
    pub fn annotation(&self) -> String {
        match self {
            Adjustment::Surcharge { extras, .. } if extras.is_empty() => " [VIP]".to_string(),
            Adjustment::Surcharge { extras, .. } => format!(" [VIP: {}]", extras.join(", ")),
            Adjustment::Discount { percent, label } => format!(" [PROMO: {label} -{percent}%]"),
        }
    }
}

/// A film with an ordered chain of pricing adjustments.
///
/// The adjusted price is computed as each adjustment is appended, so a
/// chain that would overflow is never built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedFilm {
    film: Film,
    adjustments: SmallVec<[Adjustment; 2]>,
    price: Decimal,
}

impl PricedFilm {
    /// Wrap a film with no adjustments.
    pub fn new(film: Film) -> Self {
        Self {
            price: film.base_price(),
            film,
            adjustments: SmallVec::new(),
        }
    }

    /// Append an adjustment to the end of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the adjusted price is out of range.
    pub fn then(mut self, adjustment: Adjustment) -> Result<Self, PricingError> {
        self.price = adjustment.apply(self.price)?;
        self.adjustments.push(adjustment);

        Ok(self)
    }

    /// The undecorated film
    pub fn film(&self) -> &Film {
        &self.film
    }

    /// Adjustments in application order
    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }
}

impl From<Film> for PricedFilm {
    fn from(film: Film) -> Self {
        Self::new(film)
    }
}

impl PricedItem for PricedFilm {
    fn id(&self) -> &str {
        self.film.id()
    }

    fn title(&self) -> &str {
        self.film.title()
    }

    fn description(&self) -> Cow<'_, str> {
        if self.adjustments.is_empty() {
            return self.film.description();
        }

        let mut description = self.film.description().into_owned();

        for adjustment in &self.adjustments {
            description.push_str(&adjustment.annotation());
        }

        Cow::Owned(description)
    }

    fn duration_minutes(&self) -> NonZeroU32 {
        self.film.duration_minutes()
    }

    fn genre(&self) -> &str {
        self.film.genre()
    }

    fn price(&self) -> Decimal {
        self.price
    }
}
