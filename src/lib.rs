//! # eventrec - content-based event recommendation for one user
//!
//! eventrec learns which events a single user likes from their search
//! history and ranks a catalog of events accordingly. The model is a
//! logistic regression trained from scratch with stochastic gradient descent.
//!
//! ## Core Concepts
//!
//! - **Item**: an event with a name, a category label and a date
//! - **CategoryVocabulary**: stable one-hot indices for category labels
//! - **FeatureEncoder**: turns an item into `[one-hot category..., normalized date]`
//! - **LogisticClassifier**: weights, bias and the SGD update rule
//! - **Trainer**: balanced positive/negative epochs over the user's history
//! - **Recommender**: scores the catalog and keeps the top N
//!
//! ## Usage
//!
//! ```rust
//! use eventrec::{sample, Pipeline, RecommenderConfig};
//!
//! let items = sample::catalog();
//! let user = sample::user(&items);
//!
//! let config = RecommenderConfig { seed: Some(42), ..RecommenderConfig::default() };
//! let run = Pipeline::new(config).run(&user, &items)?;
//! assert_eq!(run.recommendations.len(), 3);
//! # Ok::<(), eventrec::RecError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Domain types
pub mod error;
pub mod item;
pub mod profile;
pub mod vocabulary;

// Model
pub mod classifier;
pub mod encoder;
pub mod recommender;
pub mod trainer;

// Orchestration and glue
pub mod config;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod sample;

// Re-export primary types at crate root for convenience
pub use classifier::{sigmoid, ClassifierSnapshot, LogisticClassifier};
pub use config::RecommenderConfig;
pub use encoder::{DateWindow, FeatureEncoder, FeatureVector};
pub use error::{ConfigError, ModelError, RecError, RecResult, ValidationError};
pub use item::{Item, ItemId};
pub use model::ModelSnapshot;
pub use pipeline::{Pipeline, RecommendationRun};
pub use profile::{UserId, UserProfile};
pub use recommender::{Recommender, ScoredItem};
pub use report::Report;
pub use trainer::{Trainer, TrainingReport, TrainingSet};
pub use vocabulary::CategoryVocabulary;
