//! Poster lookup client for the TMDB catalog API.
//!
//! This crate provides:
//! - The `PosterLookup` trait the presentation layer depends on
//! - `TmdbPosterClient`, an HTTP implementation against TMDB's movie details endpoint
//!
//! "No poster" is a normal answer (`Ok(None)`). Errors are reported, but
//! callers are expected to downgrade them to "no poster" rather than fail a
//! recommendation.

use async_trait::async_trait;
use data_loader::MovieId;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

/// Default TMDB API root
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org";

/// Default image root; poster paths are appended to it
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Errors that can occur when talking to the poster service
#[derive(Error, Debug)]
pub enum PosterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Poster service returned status {status} for movie {movie_id}")]
    Status { movie_id: MovieId, status: u16 },

    #[error("Invalid response from poster service: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// Looks up poster image URLs by catalog id.
#[async_trait]
pub trait PosterLookup: Send + Sync {
    /// Poster URL for a movie, or `None` when the catalog has no image
    async fn poster_url(&self, movie_id: MovieId) -> Result<Option<String>>;
}

/// Subset of TMDB's `/3/movie/{id}` response we care about
#[derive(Debug, Deserialize)]
struct MovieDetails {
    poster_path: Option<String>,
}

/// TMDB-backed poster lookup.
#[derive(Clone)]
pub struct TmdbPosterClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base: String,
}

impl TmdbPosterClient {
    /// Create a client against the public TMDB API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
        }
    }

    /// Override the API root (default: https://api.themoviedb.org)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the image root (default: https://image.tmdb.org/t/p/w500)
    pub fn with_image_base(mut self, image_base: impl Into<String>) -> Self {
        self.image_base = image_base.into().trim_end_matches('/').to_string();
        self
    }

    fn details_url(&self, movie_id: MovieId) -> String {
        format!("{}/3/movie/{}", self.api_url, movie_id)
    }

    /// Build the full image URL from a TMDB `poster_path`
    fn image_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_base, poster_path.trim_start_matches('/'))
    }
}

#[async_trait]
impl PosterLookup for TmdbPosterClient {
    #[instrument(skip(self))]
    async fn poster_url(&self, movie_id: MovieId) -> Result<Option<String>> {
        let response = self
            .http_client
            .get(self.details_url(movie_id))
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PosterError::Status {
                movie_id,
                status: response.status().as_u16(),
            });
        }

        let details: MovieDetails = response
            .json()
            .await
            .map_err(|e| PosterError::InvalidResponse(e.to_string()))?;

        let url = details
            .poster_path
            .filter(|path| !path.trim().is_empty())
            .map(|path| self.image_url(&path));

        debug!(has_poster = url.is_some(), "Poster lookup finished");
        Ok(url)
    }
}
