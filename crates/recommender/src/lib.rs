//! Hybrid content-based recommender.
//!
//! Blends three precomputed similarity signals (TF-IDF, SVD, SBERT) into one
//! score per catalog movie and returns the best matches for a set of seed
//! titles.
//!
//! ## Architecture
//! A request goes through four stages:
//! 1. Validate the request and resolve seed titles to catalog positions
//! 2. Blend: weighted sum of the three signal rows per seed, averaged over seeds
//! 3. Rank: stable descending sort of every catalog position
//! 4. Select: take a working set of `top_n + |seeds|`, drop seeds, truncate
//!
//! Everything is pure and synchronous; the store is only ever read.
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{BlendWeights, Recommender};
//!
//! let recommender = Recommender::new(store.clone());
//! let movies = recommender.recommend(&["Avatar"], &BlendWeights::default(), 5)?;
//! ```

pub mod error;
pub mod weights;
pub mod blend;
pub mod ranking;
pub mod recommender;

// Re-export main types
pub use error::{RecommendError, Result};
pub use recommender::{Recommender, ScoredMovie, recommend, recommend_scored};
pub use weights::BlendWeights;
