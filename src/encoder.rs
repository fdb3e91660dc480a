//! Feature encoding.
//!
//! An item becomes a one-hot category block followed by a single scalar for
//! its date, linearly normalized against a [`DateWindow`].
//!
//! Two encoding modes exist:
//! - [`FeatureEncoder::encode`] grows the vocabulary on demand. Vectors
//!   encoded before a new category appears are shorter than vectors encoded
//!   after it.
//! - [`FeatureEncoder::encode_frozen`] treats the vocabulary as a fixed
//!   snapshot, so every vector has length `vocab.len() + 1`. Training and
//!   scoring use this mode after a first pass has registered every category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ValidationError};
use crate::item::Item;
use crate::vocabulary::CategoryVocabulary;

/// Reference interval used to normalize dates.
///
/// `start` maps to 0.0 and `end` maps to 1.0. Dates outside the interval
/// map outside [0, 1]; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateWindow")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateWindow> for DateWindow {
    type Error = ValidationError;

    fn try_from(raw: RawDateWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateWindow {
    /// Creates a window from two dates.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidDateWindow` if `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidDateWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// January 1st through December 31st of `year`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidYear` if chrono cannot represent the year.
    pub fn calendar_year(year: i32) -> Result<Self, ValidationError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(ValidationError::InvalidYear { year }),
        }
    }

    /// First day of the window (normalizes to 0.0).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (normalizes to 1.0).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Fraction of the window, in days, elapsed at `date`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn normalize(&self, date: NaiveDate) -> f64 {
        let span = (self.end - self.start).num_days() as f64;
        (date - self.start).num_days() as f64 / span
    }
}

/// Numeric representation of an item.
///
/// Layout: `[one-hot category..., normalized date]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Builds a vector from a one-hot block and a date scalar.
    #[must_use]
    pub fn from_parts(mut category: Vec<f64>, date: f64) -> Self {
        category.push(date);
        Self(category)
    }

    /// Total number of components, date included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a vector holds at least the date component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw components in layout order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The one-hot category block.
    #[must_use]
    pub fn category_part(&self) -> &[f64] {
        &self.0[..self.0.len() - 1]
    }

    /// The normalized date (last element).
    #[must_use]
    pub fn date_component(&self) -> f64 {
        // from_parts always pushes the date, so the vector is never empty
        self.0[self.0.len() - 1]
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Converts items into feature vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    window: DateWindow,
}

impl FeatureEncoder {
    /// Creates an encoder that normalizes dates against `window`.
    #[must_use]
    pub const fn new(window: DateWindow) -> Self {
        Self { window }
    }

    /// The date window used for normalization.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        self.window
    }

    /// Vector length produced by [`Self::encode_frozen`] for this vocabulary.
    #[must_use]
    pub fn feature_len(vocab: &CategoryVocabulary) -> usize {
        vocab.len() + 1
    }

    /// Encodes `item`, registering its category if the vocabulary lacks it.
    ///
    /// The one-hot block has the vocabulary's length *after* registration, so
    /// the result may be longer than vectors produced by earlier calls.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use eventrec::{CategoryVocabulary, DateWindow, FeatureEncoder, Item};
    ///
    /// let encoder = FeatureEncoder::new(DateWindow::calendar_year(2024).unwrap());
    /// let mut vocab = CategoryVocabulary::new();
    /// let item = Item::new("Match", "Sports", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    ///
    /// let v = encoder.encode(&item, &mut vocab);
    /// assert_eq!(v.as_slice(), &[1.0, 0.0]);
    /// ```
    pub fn encode(&self, item: &Item, vocab: &mut CategoryVocabulary) -> FeatureVector {
        let idx = vocab.get_or_insert(item.category());
        self.assemble(idx, vocab.len(), item)
    }

    /// Encodes `item` against a vocabulary that must already contain its category.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownCategory` if the category was never observed.
    pub fn encode_frozen(
        &self,
        item: &Item,
        vocab: &CategoryVocabulary,
    ) -> Result<FeatureVector, ModelError> {
        let idx = vocab
            .index_of(item.category())
            .ok_or_else(|| ModelError::UnknownCategory {
                category: item.category().to_string(),
            })?;
        Ok(self.assemble(idx, vocab.len(), item))
    }

    fn assemble(&self, idx: usize, width: usize, item: &Item) -> FeatureVector {
        let mut one_hot = vec![0.0; width];
        one_hot[idx] = 1.0;
        FeatureVector::from_parts(one_hot, self.window.normalize(item.date()))
    }
}
