//! End-to-end recommendation run.
//!
//! Each run owns a fresh vocabulary and classifier:
//! 1. register every category from the history and the catalog,
//! 2. train the classifier against that frozen vocabulary,
//! 3. score the catalog with the trained classifier and keep the top N.

use tracing::{info, warn};

use crate::classifier::LogisticClassifier;
use crate::config::RecommenderConfig;
use crate::encoder::FeatureEncoder;
use crate::error::RecResult;
use crate::item::Item;
use crate::model::ModelSnapshot;
use crate::profile::UserProfile;
use crate::recommender::{Recommender, ScoredItem};
use crate::trainer::{Trainer, TrainingReport};
use crate::vocabulary::CategoryVocabulary;

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RecommendationRun {
    /// Best items, highest score first.
    pub recommendations: Vec<ScoredItem>,
    /// Summary of the training phase.
    pub training: TrainingReport,
    /// Vocabulary frozen before training.
    pub vocabulary: CategoryVocabulary,
    /// Encoder used for training and scoring.
    pub encoder: FeatureEncoder,
    /// Classifier exactly as it scored the catalog.
    pub classifier: LogisticClassifier,
}

impl RecommendationRun {
    /// Recommended items without their scores.
    #[must_use]
    pub fn items(&self) -> Vec<&Item> {
        self.recommendations.iter().map(|r| &r.item).collect()
    }

    /// Captures the trained model for export.
    ///
    /// # Errors
    ///
    /// Returns a model error if the classifier does not fit the vocabulary.
    pub fn snapshot(&self) -> RecResult<ModelSnapshot> {
        Ok(ModelSnapshot::capture(
            &self.vocabulary,
            &self.encoder,
            &self.classifier,
        )?)
    }
}

/// Wires the trainer and recommender together under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: RecommenderConfig,
}

impl Pipeline {
    /// Creates a pipeline. The config is validated on each run.
    #[must_use]
    pub const fn new(config: RecommenderConfig) -> Self {
        Self { config }
    }

    /// The configuration runs use.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    fn classifier(&self) -> RecResult<LogisticClassifier> {
        let clf = match self.config.seed {
            Some(seed) => LogisticClassifier::with_seed(self.config.learning_rate, seed)?,
            None => LogisticClassifier::new(self.config.learning_rate)?,
        };
        Ok(clf)
    }

    /// Trains on `user`'s history and ranks `items`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid configuration or an empty
    /// history, and a model error if encoding or scoring fails.
    pub fn run(&self, user: &UserProfile, items: &[Item]) -> RecResult<RecommendationRun> {
        self.config.validate()?;

        let encoder = FeatureEncoder::new(self.config.window()?);
        let mut vocabulary = CategoryVocabulary::new();
        let mut classifier = self.classifier()?;

        let training = Trainer::new(self.config.epochs).train(
            &mut classifier,
            user,
            items,
            &encoder,
            &mut vocabulary,
        )?;

        if self.config.reinitialize_before_scoring {
            warn!("re-randomizing classifier before scoring; trained weights are discarded");
            classifier.initialize(FeatureEncoder::feature_len(&vocabulary));
        }

        let recommendations = Recommender::new(self.config.top_n).recommend(
            &classifier,
            items,
            &encoder,
            &vocabulary,
        )?;

        info!(
            user = %user.id(),
            catalog = items.len(),
            categories = vocabulary.len(),
            recommended = recommendations.len(),
            "recommendation run complete"
        );

        Ok(RecommendationRun {
            recommendations,
            training,
            vocabulary,
            encoder,
            classifier,
        })
    }
}
