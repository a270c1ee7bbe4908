//! Blend weights for the three similarity signals.

use crate::error::{RecommendError, Result};
use data_loader::Signal;
use serde::{Deserialize, Serialize};

/// One non-negative weight per similarity signal.
///
/// The recommender uses the values exactly as given. Rescaling them to sum to
/// one is the caller's job (see [`BlendWeights::normalized`]); the recommender
/// only refuses weights that cannot be averaged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    /// Weight of the TF-IDF matrix
    pub lexical: f32,
    /// Weight of the SVD matrix
    pub latent: f32,
    /// Weight of the SBERT matrix
    pub semantic: f32,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            lexical: 0.2,
            latent: 0.3,
            semantic: 0.5,
        }
    }
}

impl BlendWeights {
    pub fn new(lexical: f32, latent: f32, semantic: f32) -> Self {
        Self {
            lexical,
            latent,
            semantic,
        }
    }

    pub fn weight(&self, signal: Signal) -> f32 {
        match signal {
            Signal::Lexical => self.lexical,
            Signal::Latent => self.latent,
            Signal::Semantic => self.semantic,
        }
    }

    pub fn total(&self) -> f32 {
        self.lexical + self.latent + self.semantic
    }

    /// Check the weights can be used for scoring.
    ///
    /// Every weight must be finite and non-negative, and the total must be
    /// strictly positive.
    pub fn validate(&self) -> Result<()> {
        for signal in Signal::ALL {
            let weight = self.weight(signal);
            if !weight.is_finite() {
                return Err(RecommendError::invalid_weights(format!(
                    "{} weight is not a finite number",
                    signal
                )));
            }
            if weight < 0.0 {
                return Err(RecommendError::invalid_weights(format!(
                    "{} weight is negative ({})",
                    signal, weight
                )));
            }
        }

        if self.total() <= 0.0 {
            return Err(RecommendError::invalid_weights(
                "weights sum to zero; at least one weight must be positive",
            ));
        }
        Ok(())
    }

    /// Rescale so the weights sum to 1.
    ///
    /// Weights with a non-positive total are returned unchanged so that the
    /// recommender still rejects them.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total > 0.0 {
            Self {
                lexical: self.lexical / total,
                latent: self.latent / total,
                semantic: self.semantic / total,
            }
        } else {
            *self
        }
    }
}
