//! Catalog items and their identity.
//!
//! An item is an event a user can be recommended: a name, a free-form
//! category label and a calendar date. Items are immutable once created and
//! compare by [`ItemId`], never by field values.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable item identifier.
///
/// # Examples
///
/// ```
/// use eventrec::ItemId;
///
/// let id = ItemId::new();
/// assert!(!id.is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates a new random item ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns true if this is a nil (all zeros) UUID.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recommendable event.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use eventrec::Item;
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
/// let item = Item::new("Community Meeting", "Community", date);
/// assert_eq!(item.category(), "Community");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    category: String,
    date: NaiveDate,
}

impl Item {
    /// Creates a new item with a fresh identity.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::with_id(ItemId::new(), name, category, date)
    }

    /// Creates an item with a caller-chosen identity.
    #[must_use]
    pub fn with_id(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            date,
        }
    }

    /// Returns the item's identity.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Display name of the event.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The category label exactly as supplied (case preserved).
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Calendar date the event takes place on.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
