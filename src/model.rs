//! Model snapshots.
//!
//! A snapshot bundles everything needed to score new items later: the
//! frozen vocabulary, the date window and the classifier parameters. The
//! JSON layout carries no compatibility promise between versions.

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifierSnapshot, LogisticClassifier};
use crate::encoder::{DateWindow, FeatureEncoder};
use crate::error::{ModelError, RecResult};
use crate::vocabulary::CategoryVocabulary;

/// A trained model that can be written out and restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Frozen category index, serialized as an ordered label list.
    pub vocabulary: CategoryVocabulary,
    /// Window dates are normalized against.
    pub window: DateWindow,
    /// Learned classifier parameters.
    pub classifier: ClassifierSnapshot,
}

impl ModelSnapshot {
    /// Captures a trained model.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotInitialized` for an untrained classifier, or
    /// `ModelError::DimensionMismatch` if it does not fit the vocabulary.
    pub fn capture(
        vocabulary: &CategoryVocabulary,
        encoder: &FeatureEncoder,
        classifier: &LogisticClassifier,
    ) -> Result<Self, ModelError> {
        let snapshot = Self {
            vocabulary: vocabulary.clone(),
            window: encoder.window(),
            classifier: classifier.snapshot()?,
        };
        snapshot.check_dimensions()?;
        Ok(snapshot)
    }

    fn check_dimensions(&self) -> Result<(), ModelError> {
        let expected = FeatureEncoder::feature_len(&self.vocabulary);
        let actual = self.classifier.weights.len();
        if expected != actual {
            return Err(ModelError::DimensionMismatch { expected, actual });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ModelError::Snapshot` if serialization fails.
    pub fn to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string_pretty(self).map_err(|e| ModelError::Snapshot {
            message: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `ModelError::Snapshot` on malformed JSON, or
    /// `ModelError::DimensionMismatch` if weights and vocabulary disagree.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let snapshot: Self = serde_json::from_str(json).map_err(|e| ModelError::Snapshot {
            message: e.to_string(),
        })?;
        snapshot.check_dimensions()?;
        Ok(snapshot)
    }

    /// Encoder matching the snapshot's date window.
    #[must_use]
    pub const fn encoder(&self) -> FeatureEncoder {
        FeatureEncoder::new(self.window)
    }

    /// Rebuilds a classifier ready to score.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stored learning rate is invalid.
    pub fn classifier(&self) -> RecResult<LogisticClassifier> {
        Ok(LogisticClassifier::from_snapshot(self.classifier.clone())?)
    }
}
