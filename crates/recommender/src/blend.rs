//! Seed resolution and blended scoring.
//!
//! ## Algorithm
//! For every catalog position `j`:
//!
//! ```text
//! score[j] = mean over seeds i of (w1 * lexical[i][j] + w2 * latent[i][j] + w3 * semantic[i][j])
//! ```
//!
//! Each seed contributes one full weighted row and the rows are averaged.

use crate::error::{RecommendError, Result};
use crate::weights::BlendWeights;
use data_loader::{Signal, SimilarityStore};

/// Resolve seed titles to catalog positions, in seed order.
///
/// Lookup is exact and the first catalog match wins. Fails on the first
/// unknown title; nothing is skipped.
pub fn resolve_seeds<S: AsRef<str>>(store: &SimilarityStore, seeds: &[S]) -> Result<Vec<usize>> {
    seeds
        .iter()
        .map(|title| {
            let title = title.as_ref();
            store
                .position_of(title)
                .ok_or_else(|| RecommendError::not_found(title))
        })
        .collect()
}

/// Blended score of every catalog movie against the seed positions.
///
/// Returns one score per catalog position. An empty `positions` slice yields
/// all zeros.
pub fn blended_scores(
    store: &SimilarityStore,
    positions: &[usize],
    weights: &BlendWeights,
) -> Vec<f32> {
    let mut scores = vec![0.0_f32; store.len()];
    if positions.is_empty() {
        return scores;
    }

    for &seed in positions {
        let lexical = store.row(Signal::Lexical, seed);
        let latent = store.row(Signal::Latent, seed);
        let semantic = store.row(Signal::Semantic, seed);

        let rows = lexical.iter().zip(latent).zip(semantic);
        for (score, ((&lex, &lat), &sem)) in scores.iter_mut().zip(rows) {
            *score += weights.lexical * lex + weights.latent * lat + weights.semantic * sem;
        }
    }

    let count = positions.len() as f32;
    for score in &mut scores {
        *score /= count;
    }
    scores
}
