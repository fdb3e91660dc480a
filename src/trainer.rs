//! Training loop.
//!
//! Positives are the user's search history; negatives are catalog items the
//! user never searched, taken in catalog order and capped at the number of
//! positives so both classes carry the same weight. Every epoch replays the
//! positives (target 1) and then the negatives (target 0) in a fixed order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::LogisticClassifier;
use crate::encoder::{FeatureEncoder, FeatureVector};
use crate::error::{RecResult, ValidationError};
use crate::item::{Item, ItemId};
use crate::profile::UserProfile;
use crate::vocabulary::CategoryVocabulary;

const LOG_EVERY_EPOCHS: usize = 100;

/// Encoded, class-balanced training data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    /// History items, label 1.0.
    pub positives: Vec<FeatureVector>,
    /// Unsearched catalog items, label 0.0.
    pub negatives: Vec<FeatureVector>,
}

impl TrainingSet {
    /// Total number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positives.len() + self.negatives.len()
    }

    /// Returns true if there is nothing to train on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positives.is_empty() && self.negatives.is_empty()
    }

    fn labeled(&self) -> impl Iterator<Item = (&FeatureVector, f64)> {
        self.positives
            .iter()
            .map(|v| (v, 1.0))
            .chain(self.negatives.iter().map(|v| (v, 0.0)))
    }

    /// Mean binary cross-entropy over every sample.
    ///
    /// # Errors
    ///
    /// Propagates classifier errors.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_loss(&self, classifier: &LogisticClassifier) -> RecResult<f64> {
        if self.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for (features, target) in self.labeled() {
            total += classifier.loss(features.as_slice(), target)?;
        }
        Ok(total / self.len() as f64)
    }
}

/// Outcome of a [`Trainer::train`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Passes made over the training set.
    pub epochs: usize,
    /// Number of positive samples.
    pub positives: usize,
    /// Number of negative samples.
    pub negatives: usize,
    /// Feature length the classifier was initialized with.
    pub input_size: usize,
    /// Mean loss right after initialization.
    pub initial_loss: f64,
    /// Mean loss after the last epoch.
    pub final_loss: f64,
}

/// Fits a [`LogisticClassifier`] to one user's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trainer {
    epochs: usize,
}

impl Trainer {
    /// Creates a trainer that makes `epochs` passes.
    #[must_use]
    pub const fn new(epochs: usize) -> Self {
        Self { epochs }
    }

    /// Registers every category, then encodes positives and negatives against
    /// the completed vocabulary so all vectors share one length.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyHistory` if the user has no history.
    pub fn build_training_set(
        user: &UserProfile,
        items: &[Item],
        encoder: &FeatureEncoder,
        vocab: &mut CategoryVocabulary,
    ) -> RecResult<TrainingSet> {
        if user.history().is_empty() {
            return Err(ValidationError::EmptyHistory {
                user_id: user.id().get(),
            }
            .into());
        }

        let added = vocab.observe(user.history()) + vocab.observe(items);
        debug!(added, size = vocab.len(), "vocabulary frozen for training");
        let vocab: &CategoryVocabulary = vocab;

        let positives = user
            .history()
            .iter()
            .map(|item| encoder.encode_frozen(item, vocab))
            .collect::<Result<Vec<_>, _>>()?;

        let searched: HashSet<ItemId> = user.history().iter().map(Item::id).collect();
        let mut emitted: HashSet<ItemId> = HashSet::new();
        let negatives = items
            .iter()
            .filter(|item| !searched.contains(&item.id()) && emitted.insert(item.id()))
            .take(positives.len())
            .map(|item| encoder.encode_frozen(item, vocab))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TrainingSet {
            positives,
            negatives,
        })
    }

    /// Initializes `classifier` for the frozen vocabulary and runs the epoch loop.
    ///
    /// If the training set cannot be built the classifier is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyHistory` if the user has no history, or a
    /// model error if encoding fails.
    pub fn train(
        &self,
        classifier: &mut LogisticClassifier,
        user: &UserProfile,
        items: &[Item],
        encoder: &FeatureEncoder,
        vocab: &mut CategoryVocabulary,
    ) -> RecResult<TrainingReport> {
        let set = Self::build_training_set(user, items, encoder, vocab)?;
        let input_size = FeatureEncoder::feature_len(vocab);
        classifier.initialize(input_size);

        let initial_loss = set.mean_loss(classifier)?;
        for epoch in 1..=self.epochs {
            for (features, target) in set.labeled() {
                classifier.update_step(features.as_slice(), target)?;
            }
            if epoch % LOG_EVERY_EPOCHS == 0 {
                let loss = set.mean_loss(classifier)?;
                debug!(epoch, loss, "training progress");
            }
        }
        let final_loss = set.mean_loss(classifier)?;

        info!(
            user = %user.id(),
            epochs = self.epochs,
            positives = set.positives.len(),
            negatives = set.negatives.len(),
            initial_loss,
            final_loss,
            "training finished"
        );

        Ok(TrainingReport {
            epochs: self.epochs,
            positives: set.positives.len(),
            negatives: set.negatives.len(),
            input_size,
            initial_loss,
            final_loss,
        })
    }
}
