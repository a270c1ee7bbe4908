//! The `recommend` operation and the `Recommender` handle.

use crate::blend::{blended_scores, resolve_seeds};
use crate::error::{RecommendError, Result};
use crate::ranking::{rank_positions, select};
use crate::weights::BlendWeights;
use data_loader::{Movie, SimilarityStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A recommended movie together with its blended score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMovie {
    /// Catalog position (row/column index in the matrices)
    pub position: usize,
    pub score: f32,
    pub movie: Movie,
}

/// Recommend up to `top_n` movies similar to the seed titles.
///
/// Returns catalog records in descending blended-score order, never including
/// a seed title. See [`recommend_scored`] for the scores themselves.
pub fn recommend<S: AsRef<str>>(
    store: &SimilarityStore,
    seeds: &[S],
    weights: &BlendWeights,
    top_n: usize,
) -> Result<Vec<Movie>> {
    let scored = recommend_scored(store, seeds, weights, top_n)?;
    Ok(scored.into_iter().map(|s| s.movie).collect())
}

/// Same ranking as [`recommend`], keeping position and score per row.
///
/// # Errors
/// Checked in this order, before any scoring:
/// * `EmptySeeds` - no seed titles
/// * `InvalidTopN` - `top_n` is zero
/// * `InvalidWeights` - a weight is negative or non-finite, or they sum to zero
/// * `NotFound` - a seed title is not in the catalog
#[instrument(skip(store, seeds, weights), fields(seed_count = seeds.len()))]
pub fn recommend_scored<S: AsRef<str>>(
    store: &SimilarityStore,
    seeds: &[S],
    weights: &BlendWeights,
    top_n: usize,
) -> Result<Vec<ScoredMovie>> {
    if seeds.is_empty() {
        return Err(RecommendError::EmptySeeds);
    }
    if top_n == 0 {
        return Err(RecommendError::InvalidTopN);
    }
    weights.validate()?;
    let positions = resolve_seeds(store, seeds)?;

    let scores = blended_scores(store, &positions, weights);
    let ranked = rank_positions(&scores);
    let selected = select(store, &ranked, seeds, top_n);

    debug!(
        catalog = store.len(),
        working_set = top_n.saturating_add(seeds.len()).min(store.len()),
        selected = selected.len(),
        "Ranked catalog"
    );

    Ok(selected
        .into_iter()
        .map(|position| ScoredMovie {
            position,
            score: scores[position],
            movie: store.movies()[position].clone(),
        })
        .collect())
}

/// Recommender bound to a loaded similarity store.
///
/// Holds only a shared read-only handle, so clones are cheap and calls from
/// different threads never contend.
#[derive(Debug, Clone)]
pub struct Recommender {
    store: Arc<SimilarityStore>,
}

impl Recommender {
    pub fn new(store: Arc<SimilarityStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<SimilarityStore> {
        &self.store
    }

    pub fn recommend<S: AsRef<str>>(
        &self,
        seeds: &[S],
        weights: &BlendWeights,
        top_n: usize,
    ) -> Result<Vec<Movie>> {
        recommend(&self.store, seeds, weights, top_n)
    }

    pub fn recommend_scored<S: AsRef<str>>(
        &self,
        seeds: &[S],
        weights: &BlendWeights,
        top_n: usize,
    ) -> Result<Vec<ScoredMovie>> {
        recommend_scored(&self.store, seeds, weights, top_n)
    }
}
