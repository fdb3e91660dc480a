//! The single user being recommended for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemId};

/// Numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user and the items they have engaged with, in engagement order.
///
/// History only grows through [`UserProfile::add_search`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    history: Vec<Item>,
}

impl UserProfile {
    /// Creates a profile with an empty search history.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self {
            id,
            history: Vec::new(),
        }
    }

    /// Records that the user engaged with `item`.
    pub fn add_search(&mut self, item: Item) {
        self.history.push(item);
    }

    /// Returns the user's id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Engaged items, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Item] {
        &self.history
    }

    /// Returns true if an item with this identity is in the history.
    #[must_use]
    pub fn has_searched(&self, id: &ItemId) -> bool {
        self.history.iter().any(|item| item.id() == *id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_add_search_preserves_order() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let first = Item::new("First", "A", date);
        let second = Item::new("Second", "B", date);

        let mut user = UserProfile::new(UserId::new(7));
        user.add_search(first.clone());
        user.add_search(second.clone());

        assert_eq!(user.id().get(), 7);
        assert_eq!(user.history(), &[first.clone(), second]);
        assert!(user.has_searched(&first.id()));
        assert!(!user.has_searched(&ItemId::new()));
    }
}
