//! Films

use std::{borrow::Cow, num::NonZeroU32};

use rust_decimal::Decimal;

use crate::records::{
    DELIMITER, RecordError, RecordKind, parse_positive, parse_price, split_fields,
};

/// Read contract shared by base films and priced variants.
pub trait PricedItem {
    /// Film identifier
    fn id(&self) -> &str;

    /// Film title
    fn title(&self) -> &str;

    /// Description, including any pricing annotations
    fn description(&self) -> Cow<'_, str>;

    /// Running time in minutes
    fn duration_minutes(&self) -> NonZeroU32;

    /// Genre or category
    fn genre(&self) -> &str;

    /// Ticket price
    fn price(&self) -> Decimal;

    /// Serialise back to a flat film record.
    fn to_record(&self) -> String {
        let fields = [
            self.id().to_owned(),
            self.title().to_owned(),
            self.description().into_owned(),
            self.duration_minutes().to_string(),
            self.genre().to_owned(),
            self.price().to_string(),
        ];

        fields.join(&DELIMITER.to_string())
    }
}

/// A film as entered by an administrator, with its base ticket price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    id: String,
    title: String,
    description: String,
    duration_minutes: NonZeroU32,
    genre: String,
    base_price: Decimal,
}

impl Film {
    /// Creates a new film.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: NonZeroU32,
        genre: impl Into<String>,
        base_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            duration_minutes,
            genre: genre.into(),
            base_price,
        }
    }

    /// Parse a film from `id;title;description;durationMinutes;genre;basePrice`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] on a wrong field count, a duration that is not
    /// a positive integer, or a price that is not a non-negative decimal.
    pub fn from_record(record: &str) -> Result<Self, RecordError> {
        let kind = RecordKind::Film;
        let [id, title, description, duration, genre, price] = split_fields(record, kind)?;

        Ok(Self::new(
            id,
            title,
            description,
            parse_positive(duration, kind, "durationMinutes")?,
            genre,
            parse_price(price, kind, "basePrice")?,
        ))
    }

    /// Base ticket price, before any adjustment
    pub fn base_price(&self) -> Decimal {
        self.base_price
    }
}

impl PricedItem for Film {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.description)
    }

    fn duration_minutes(&self) -> NonZeroU32 {
        self.duration_minutes
    }

    fn genre(&self) -> &str {
        &self.genre
    }

    fn price(&self) -> Decimal {
        self.base_price
    }
}
