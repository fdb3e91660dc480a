//! Category vocabulary.
//!
//! Maps lower-cased category labels to one-hot slot indices. Indices are
//! assigned in first-seen order and never change once handed out, so the
//! vocabulary only ever grows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::item::Item;

fn normalize_label(label: &str) -> String {
    label.to_lowercase()
}

/// Insertion-ordered, monotonically growing category index.
///
/// # Examples
///
/// ```
/// use eventrec::CategoryVocabulary;
///
/// let mut vocab = CategoryVocabulary::new();
/// assert_eq!(vocab.get_or_insert("Sports"), 0);
/// assert_eq!(vocab.get_or_insert("Music"), 1);
/// assert_eq!(vocab.index_of("SPORTS"), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryVocabulary {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoryVocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct categories seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no category has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Looks up a label case-insensitively.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(&normalize_label(label)).copied()
    }

    /// Returns the index for `label`, assigning the next free one if unseen.
    pub fn get_or_insert(&mut self, label: &str) -> usize {
        let key = normalize_label(label);
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }

        let idx = self.labels.len();
        debug!(category = %key, index = idx, "vocabulary grew");
        self.labels.push(key.clone());
        self.index.insert(key, idx);
        idx
    }

    /// Registers every item's category, returning how many were new.
    pub fn observe<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let before = self.len();
        for item in items {
            self.get_or_insert(item.category());
        }
        self.len() - before
    }

    /// Normalized labels in index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl From<Vec<String>> for CategoryVocabulary {
    fn from(labels: Vec<String>) -> Self {
        let mut vocab = Self::new();
        for label in &labels {
            vocab.get_or_insert(label);
        }
        vocab
    }
}

impl From<CategoryVocabulary> for Vec<String> {
    fn from(vocab: CategoryVocabulary) -> Self {
        vocab.labels
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_indices_are_insertion_ordered() {
        let mut vocab = CategoryVocabulary::new();
        assert_eq!(vocab.get_or_insert("Community"), 0);
        assert_eq!(vocab.get_or_insert("Sports"), 1);
        assert_eq!(vocab.get_or_insert("Music"), 2);
        assert_eq!(vocab.labels(), &["community", "sports", "music"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut vocab = CategoryVocabulary::new();
        vocab.get_or_insert("Technology");
        assert_eq!(vocab.get_or_insert("TECHNOLOGY"), 0);
        assert_eq!(vocab.index_of("technology"), Some(0));
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_existing_index_never_changes() {
        let mut vocab = CategoryVocabulary::new();
        let art = vocab.get_or_insert("Art");
        for label in ["Food", "Music", "art", "Sports"] {
            vocab.get_or_insert(label);
        }
        assert_eq!(vocab.index_of("Art"), Some(art));
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    fn test_observe_counts_new_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let items = vec![
            Item::new("a", "Food", date),
            Item::new("b", "food", date),
            Item::new("c", "Art", date),
        ];
        let mut vocab = CategoryVocabulary::new();
        assert_eq!(vocab.observe(&items), 2);
        assert_eq!(vocab.observe(&items), 0);
    }

    #[test]
    fn test_unknown_label() {
        let vocab = CategoryVocabulary::new();
        assert!(vocab.is_empty());
        assert_eq!(vocab.index_of("anything"), None);
    }

    #[test]
    fn test_serializes_as_ordered_labels() {
        let mut vocab = CategoryVocabulary::new();
        vocab.get_or_insert("Sports");
        vocab.get_or_insert("Art");

        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["sports","art"]"#);

        let parsed: CategoryVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vocab);
        assert_eq!(parsed.index_of("ART"), Some(1));
    }
}
