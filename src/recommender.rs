//! Ranking.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::LogisticClassifier;
use crate::encoder::FeatureEncoder;
use crate::error::RecResult;
use crate::item::Item;
use crate::vocabulary::CategoryVocabulary;

/// An item paired with the classifier's probability that the user likes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// The catalog item.
    pub item: Item,
    /// Probability in [0, 1].
    pub score: f64,
}

/// Scores a catalog with an already-trained classifier and keeps the best.
///
/// The recommender never touches the classifier's parameters. Callers who
/// want a freshly randomized model must call
/// [`LogisticClassifier::initialize`] themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommender {
    top_n: usize,
}

impl Recommender {
    /// Creates a recommender returning at most `top_n` items.
    #[must_use]
    pub const fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Maximum number of items returned.
    #[must_use]
    pub const fn top_n(&self) -> usize {
        self.top_n
    }

    /// Scores every item in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a model error if an item's category is missing from `vocab` or the
    /// classifier was initialized for a different vocabulary size.
    pub fn score_all(
        classifier: &LogisticClassifier,
        items: &[Item],
        encoder: &FeatureEncoder,
        vocab: &CategoryVocabulary,
    ) -> RecResult<Vec<ScoredItem>> {
        items
            .iter()
            .map(|item| -> RecResult<ScoredItem> {
                let features = encoder.encode_frozen(item, vocab)?;
                let score = classifier.predict(features.as_slice())?;
                Ok(ScoredItem {
                    item: item.clone(),
                    score,
                })
            })
            .collect()
    }

    /// Returns at most `top_n` items by descending score.
    ///
    /// Equal scores keep their catalog order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::score_all`].
    pub fn recommend(
        &self,
        classifier: &LogisticClassifier,
        items: &[Item],
        encoder: &FeatureEncoder,
        vocab: &CategoryVocabulary,
    ) -> RecResult<Vec<ScoredItem>> {
        let mut scored = Self::score_all(classifier, items, encoder, vocab)?;
        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.top_n);

        debug!(
            candidates = items.len(),
            returned = scored.len(),
            "ranked catalog"
        );
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::classifier::ClassifierSnapshot;
    use crate::encoder::DateWindow;
    use crate::error::{ModelError, RecError};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(DateWindow::calendar_year(2024).unwrap())
    }

    fn classifier(weights: Vec<f64>) -> LogisticClassifier {
        LogisticClassifier::from_snapshot(ClassifierSnapshot {
            weights,
            bias: 0.0,
            learning_rate: 0.01,
        })
        .unwrap()
    }

    fn catalog() -> (Vec<Item>, CategoryVocabulary) {
        let items = vec![
            Item::new("Art Exhibition", "Art", date(12, 1)),
            Item::new("Music Concert", "Music", date(11, 22)),
            Item::new("Food Festival", "Food", date(8, 25)),
        ];
        let mut vocab = CategoryVocabulary::new();
        vocab.observe(&items);
        (items, vocab)
    }

    #[test]
    fn test_recommend_sorts_descending() {
        let (items, vocab) = catalog();
        // art, music, food, date
        let clf = classifier(vec![-1.0, 2.0, 0.5, 0.0]);

        let recs = Recommender::new(3)
            .recommend(&clf, &items, &encoder(), &vocab)
            .unwrap();

        let names: Vec<_> = recs.iter().map(|r| r.item.name()).collect();
        assert_eq!(names, ["Music Concert", "Food Festival", "Art Exhibition"]);
        assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let (items, vocab) = catalog();
        let clf = classifier(vec![0.0; 4]);

        let recs = Recommender::new(3)
            .recommend(&clf, &items, &encoder(), &vocab)
            .unwrap();
        assert_eq!(
            recs.iter().map(|r| r.item.id()).collect::<Vec<_>>(),
            items.iter().map(Item::id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_truncates_to_top_n() {
        let (items, vocab) = catalog();
        let clf = classifier(vec![0.1, 0.2, 0.3, 0.4]);
        let enc = encoder();

        assert_eq!(Recommender::new(2).recommend(&clf, &items, &enc, &vocab).unwrap().len(), 2);
        assert_eq!(Recommender::new(10).recommend(&clf, &items, &enc, &vocab).unwrap().len(), 3);
        assert!(Recommender::new(0).recommend(&clf, &items, &enc, &vocab).unwrap().is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let vocab = CategoryVocabulary::new();
        let clf = classifier(vec![0.3]);
        let recs = Recommender::new(3)
            .recommend(&clf, &[], &encoder(), &vocab)
            .unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_stale_classifier_is_rejected() {
        let (items, vocab) = catalog();
        let clf = classifier(vec![0.1, 0.2]);
        let err = Recommender::new(3)
            .recommend(&clf, &items, &encoder(), &vocab)
            .unwrap_err();
        assert!(matches!(
            err,
            RecError::Model(ModelError::DimensionMismatch {
                expected: 2,
                actual: 4
            })
        ));
    }
}
