//! Error types for eventrec.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the specific failure instead of parsing messages.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Validation errors raised before any computation starts.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Learning rate is not finite or not positive.
    #[error("Learning rate {value} must be finite and greater than zero")]
    InvalidLearningRate {
        /// The rejected rate.
        value: f64,
    },

    /// Window start is not strictly before its end.
    #[error("Invalid date window: start ({start}) must be before end ({end})")]
    InvalidDateWindow {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// chrono cannot represent the year.
    #[error("Year {year} is outside the supported calendar range")]
    InvalidYear {
        /// The rejected year.
        year: i32,
    },

    /// The user has not searched anything yet.
    #[error("User {user_id} has an empty search history")]
    EmptyHistory {
        /// Raw id of the user.
        user_id: u64,
    },

    /// A numeric setting is below its minimum.
    #[error("Field '{field}' must be at least {min}")]
    TooSmall {
        /// Setting name.
        field: &'static str,
        /// Smallest accepted value.
        min: u64,
    },
}

/// Errors raised by the classifier and the feature encoder.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input length differs from the classifier's weight count.
    #[error("Feature vector has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        /// Weight count.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },

    /// Predict or update called before `initialize`.
    #[error("Classifier weights are not initialized")]
    NotInitialized,

    /// Frozen encoding met a label the vocabulary never saw.
    #[error("Category '{category}' is not in the vocabulary")]
    UnknownCategory {
        /// Label as it appeared on the item.
        category: String,
    },

    /// JSON encoding or decoding of a snapshot failed.
    #[error("Failed to (de)serialize model snapshot: {message}")]
    Snapshot {
        /// Underlying serde_json message.
        message: String,
    },
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this config.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level error type for eventrec.
#[derive(Debug, Error)]
pub enum RecError {
    /// Invalid input or configuration.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Classifier, encoder or snapshot failure.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Configuration loading failure.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Broken internal invariant.
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl RecError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a model error.
    #[must_use]
    pub const fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }

    /// Returns true if this is a config error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if the input collections were empty.
    #[must_use]
    pub const fn is_empty_input(&self) -> bool {
        matches!(self, Self::Validation(ValidationError::EmptyHistory { .. }))
    }

    /// Returns true if a feature vector did not fit the classifier.
    #[must_use]
    pub const fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::Model(ModelError::DimensionMismatch { .. }))
    }
}

/// Result type alias for eventrec operations.
pub type RecResult<T> = Result<T, RecError>;
