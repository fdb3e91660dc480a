//! Run configuration loaded from TOML.
//!
//! Every field is optional in the file; missing fields take the defaults
//! below.
//!
//! ```toml
//! learning_rate = 0.01
//! epochs = 1000
//! top_n = 3
//! seed = 42
//! window_year = 2024
//! reinitialize_before_scoring = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::encoder::DateWindow;
use crate::error::{ConfigError, RecResult, ValidationError};

/// Hyperparameters and switches for one recommendation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// SGD step size.
    pub learning_rate: f64,
    /// Passes over the training set.
    pub epochs: usize,
    /// Maximum number of recommendations returned.
    pub top_n: usize,
    /// Seed for weight initialization; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Calendar year used as the date normalization window.
    pub window_year: i32,
    /// Re-randomize the classifier between training and scoring.
    ///
    /// Off by default: scoring then uses the trained weights.
    pub reinitialize_before_scoring: bool,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 1000,
            top_n: 3,
            seed: None,
            window_year: 2024,
            reinitialize_before_scoring: false,
        }
    }
}

impl RecommenderConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed TOML or unknown keys.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or `ConfigError::Parse`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a non-positive learning rate, a zero
    /// `top_n`, or an unrepresentable window year.
    pub fn validate(&self) -> RecResult<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ValidationError::InvalidLearningRate {
                value: self.learning_rate,
            }
            .into());
        }
        if self.top_n == 0 {
            return Err(ValidationError::TooSmall {
                field: "top_n",
                min: 1,
            }
            .into());
        }
        self.window()?;
        Ok(())
    }

    /// The date normalization window for `window_year`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidYear` if the year cannot be represented.
    pub fn window(&self) -> Result<DateWindow, ValidationError> {
        DateWindow::calendar_year(self.window_year)
    }
}
