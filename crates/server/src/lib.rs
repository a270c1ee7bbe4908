//! Server crate for the ReelRecs hybrid recommender.
//!
//! This crate contains the service that turns a presentation-layer request
//! into ranked, poster-decorated recommendations.

pub mod service;

pub use service::{MovieRecommendation, RecommendationRequest, RecommendationService};
