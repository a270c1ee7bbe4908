//! # Recommendation Service
//!
//! This module sits between the presentation layer and the recommender:
//! 1. Renormalize the raw slider weights so they sum to 1
//! 2. Run the recommender on the blocking pool (pure CPU work)
//! 3. Look up posters for every result row concurrently
//! 4. Return ranked rows ready for display
//!
//! Poster lookups never fail a request: any lookup error is logged and the
//! row is shown without an image.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};

use data_loader::{Movie, SimilarityStore};
use poster_client::PosterLookup;
use recommender::{BlendWeights, Recommender, ScoredMovie};

/// What the presentation layer asks for
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub seeds: Vec<String>,
    /// Raw weights as entered; normalized before use
    pub weights: BlendWeights,
    pub top_n: usize,
}

/// Final recommendation row returned to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    /// 1-based rank
    pub rank: usize,
    #[serde(flatten)]
    pub movie: Movie,
    pub score: f32,
    pub poster_url: Option<String>,
}

/// Serves recommendations over a shared, read-only similarity store.
#[derive(Clone)]
pub struct RecommendationService {
    recommender: Recommender,
    posters: Option<Arc<dyn PosterLookup>>,
}

impl RecommendationService {
    /// Create a service without poster lookups
    pub fn new(store: Arc<SimilarityStore>) -> Self {
        Self {
            recommender: Recommender::new(store),
            posters: None,
        }
    }

    /// Attach a poster lookup service (builder pattern)
    pub fn with_posters(mut self, posters: Arc<dyn PosterLookup>) -> Self {
        self.posters = Some(posters);
        self
    }

    pub fn store(&self) -> &Arc<SimilarityStore> {
        self.recommender.store()
    }

    /// Main entry point: ranked recommendations for a request
    ///
    /// Recommender errors (`NotFound`, `InvalidWeights`, ...) are returned
    /// with context and stay downcastable to `recommender::RecommendError`.
    #[instrument(skip(self, request), fields(seeds = ?request.seeds, top_n = request.top_n))]
    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<MovieRecommendation>> {
        let start_time = Instant::now();

        let weights = request.weights.normalized();
        let scored = self
            .rank(request.seeds.clone(), weights, request.top_n)
            .await?;
        info!("Ranked {} recommendations", scored.len());

        let posters = self.fetch_posters(&scored).await;

        let recommendations: Vec<MovieRecommendation> = scored
            .into_iter()
            .zip(posters)
            .enumerate()
            .map(|(idx, (row, poster_url))| MovieRecommendation {
                rank: idx + 1,
                movie: row.movie,
                score: row.score,
                poster_url,
            })
            .collect();

        info!(
            "Served {} recommendations in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Run the recommender off the async executor
    async fn rank(
        &self,
        seeds: Vec<String>,
        weights: BlendWeights,
        top_n: usize,
    ) -> Result<Vec<ScoredMovie>> {
        let recommender = self.recommender.clone();
        let scored = tokio::task::spawn_blocking(move || {
            recommender.recommend_scored(&seeds, &weights, top_n)
        })
        .await
        .context("Recommender task panicked")?
        .context("Failed to compute recommendations")?;
        Ok(scored)
    }

    /// Poster URL per row, in row order. Failures become `None`.
    async fn fetch_posters(&self, rows: &[ScoredMovie]) -> Vec<Option<String>> {
        let Some(posters) = &self.posters else {
            return vec![None; rows.len()];
        };

        // One task per row so lookups overlap
        let handles: Vec<_> = rows
            .iter()
            .map(|row| {
                let posters = Arc::clone(posters);
                let movie_id = row.movie.id;
                tokio::spawn(async move {
                    match movie_id {
                        Some(id) => posters.poster_url(id).await,
                        None => Ok(None),
                    }
                })
            })
            .collect();

        let mut urls = Vec::with_capacity(handles.len());
        for (handle, row) in handles.into_iter().zip(rows) {
            let url = match handle.await {
                Ok(Ok(url)) => url,
                Ok(Err(e)) => {
                    warn!(title = %row.movie.title, error = %e, "Poster lookup failed");
                    None
                }
                Err(e) => {
                    warn!(title = %row.movie.title, error = %e, "Poster task failed");
                    None
                }
            };
            urls.push(url);
        }
        urls
    }
}
