//! Error types for the recommender.
//!
//! All of these are raised before any scoring happens, so a failed call never
//! produces a partial ranking.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// A seed title is not in the catalog (exact match)
    #[error("Movie '{title}' not found!")]
    NotFound { title: String },

    /// The blend weights cannot produce a meaningful average
    #[error("Invalid blend weights: {reason}")]
    InvalidWeights { reason: String },

    /// No seed titles were supplied
    #[error("At least one seed title is required")]
    EmptySeeds,

    /// The requested result count was zero
    #[error("Requested recommendation count must be positive")]
    InvalidTopN,
}

impl RecommendError {
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound { title: title.into() }
    }

    pub fn invalid_weights(reason: impl Into<String>) -> Self {
        Self::InvalidWeights { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
