//! Logistic regression classifier.
//!
//! A single weight vector plus bias, squashed through the logistic function.
//! Training is plain stochastic gradient descent on binary cross-entropy:
//! for one sample `x` with target `t`, `w += lr * (t - p) * x` and
//! `b += lr * (t - p)` where `p = predict(x)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ModelError, ValidationError};

/// Half-width of the uniform weight initialization interval.
pub const INIT_WEIGHT_SPAN: f64 = 0.5;

/// Floor applied to probabilities inside the log of the loss.
const LOSS_EPSILON: f64 = 1e-12;

/// The logistic function `1 / (1 + e^-z)`.
#[must_use]
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn validate_learning_rate(learning_rate: f64) -> Result<(), ValidationError> {
    if learning_rate.is_finite() && learning_rate > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidLearningRate {
            value: learning_rate,
        })
    }
}

/// Serializable classifier parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSnapshot {
    /// One weight per input feature.
    pub weights: Vec<f64>,
    /// Intercept added to the weighted sum.
    pub bias: f64,
    /// SGD step size; must lie in (0, 1].
    pub learning_rate: f64,
}

/// Binary logistic regression trained by SGD.
///
/// A classifier starts uninitialized. [`LogisticClassifier::initialize`]
/// allocates random weights for a given input size and throws away whatever
/// was learned before; nothing else resets the parameters.
///
/// # Examples
///
/// ```
/// use eventrec::LogisticClassifier;
///
/// let mut clf = LogisticClassifier::with_seed(0.1, 7).unwrap();
/// clf.initialize(3);
/// let p = clf.predict(&[1.0, 0.0, 0.5]).unwrap();
/// assert!(p > 0.0 && p < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    weights: Option<Vec<f64>>,
    bias: f64,
    learning_rate: f64,
    rng: StdRng,
}

impl LogisticClassifier {
    /// Creates an uninitialized classifier seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidLearningRate` unless the rate is finite and positive.
    pub fn new(learning_rate: f64) -> Result<Self, ValidationError> {
        Self::with_rng(learning_rate, StdRng::from_entropy())
    }

    /// Creates an uninitialized classifier with deterministic initialization.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidLearningRate` unless the rate is finite and positive.
    pub fn with_seed(learning_rate: f64, seed: u64) -> Result<Self, ValidationError> {
        Self::with_rng(learning_rate, StdRng::seed_from_u64(seed))
    }

    fn with_rng(learning_rate: f64, rng: StdRng) -> Result<Self, ValidationError> {
        validate_learning_rate(learning_rate)?;
        Ok(Self {
            weights: None,
            bias: 0.0,
            learning_rate,
            rng,
        })
    }

    /// Restores parameters from a snapshot. Later calls to `initialize` draw from entropy.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidLearningRate` if the snapshot's rate is invalid.
    pub fn from_snapshot(snapshot: ClassifierSnapshot) -> Result<Self, ValidationError> {
        let mut clf = Self::new(snapshot.learning_rate)?;
        clf.weights = Some(snapshot.weights);
        clf.bias = snapshot.bias;
        Ok(clf)
    }

    /// Allocates `input_size` weights drawn uniformly from [-0.5, 0.5) and zeroes the bias.
    pub fn initialize(&mut self, input_size: usize) {
        let weights = (0..input_size)
            .map(|_| self.rng.gen_range(-INIT_WEIGHT_SPAN..INIT_WEIGHT_SPAN))
            .collect();
        self.weights = Some(weights);
        self.bias = 0.0;
        debug!(input_size, "classifier initialized");
    }

    /// Returns true once [`Self::initialize`] has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.weights.is_some()
    }

    /// Number of inputs the classifier expects, if initialized.
    #[must_use]
    pub fn input_size(&self) -> Option<usize> {
        self.weights.as_ref().map(Vec::len)
    }

    /// Current weights; empty before initialization.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        self.weights.as_deref().unwrap_or(&[])
    }

    /// Current bias term.
    #[must_use]
    pub const fn bias(&self) -> f64 {
        self.bias
    }

    /// SGD step size.
    #[must_use]
    pub const fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn checked_weights(&self, features: &[f64]) -> Result<&[f64], ModelError> {
        let weights = self.weights.as_deref().ok_or(ModelError::NotInitialized)?;
        if weights.len() != features.len() {
            return Err(ModelError::DimensionMismatch {
                expected: weights.len(),
                actual: features.len(),
            });
        }
        Ok(weights)
    }

    /// Probability in (0, 1) that the user likes the item behind `features`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotInitialized` before `initialize`, or
    /// `ModelError::DimensionMismatch` if `features` has the wrong length.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let weights = self.checked_weights(features)?;
        let z = weights
            .iter()
            .zip(features)
            .fold(self.bias, |acc, (w, x)| acc + w * x);
        Ok(sigmoid(z))
    }

    /// Applies one gradient-descent step toward `target` and returns the
    /// error `target - prediction` measured before the step.
    ///
    /// # Errors
    ///
    /// Same as [`Self::predict`].
    pub fn update_step(&mut self, features: &[f64], target: f64) -> Result<f64, ModelError> {
        let output = self.predict(features)?;
        let error = target - output;
        let step = self.learning_rate * error;

        let weights = self.weights.as_mut().ok_or(ModelError::NotInitialized)?;
        for (w, x) in weights.iter_mut().zip(features) {
            *w += step * x;
        }
        self.bias += step;
        Ok(error)
    }

    /// Binary cross-entropy of the current prediction against `target`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::predict`].
    pub fn loss(&self, features: &[f64], target: f64) -> Result<f64, ModelError> {
        let p = self.predict(features)?.clamp(LOSS_EPSILON, 1.0 - LOSS_EPSILON);
        Ok(-(target * p.ln() + (1.0 - target) * (1.0 - p).ln()))
    }

    /// Copies out the current parameters.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotInitialized` before `initialize`.
    pub fn snapshot(&self) -> Result<ClassifierSnapshot, ModelError> {
        let weights = self.weights.clone().ok_or(ModelError::NotInitialized)?;
        Ok(ClassifierSnapshot {
            weights,
            bias: self.bias,
            learning_rate: self.learning_rate,
        })
    }
}
