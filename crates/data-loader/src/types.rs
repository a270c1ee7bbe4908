//! Core domain types for the similarity store.
//!
//! The catalog order is the index space for everything else: position `i`
//! in the catalog is row and column `i` of every similarity matrix.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Catalog identifier of a movie (a TMDB id in the shipped dataset)
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A single catalog record.
///
/// `title` is the lookup key used by the recommender. `id` is only needed by
/// the presentation layer (poster lookup) and may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Option<MovieId>,
    pub title: String,
    /// Genre labels, kept exactly as they appear in the bundle
    pub genres: Vec<String>,
}

// =============================================================================
// Signals
// =============================================================================

/// The three precomputed similarity signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    /// TF-IDF over movie descriptions
    Lexical,
    /// SVD-reduced latent factors
    Latent,
    /// SBERT sentence embeddings
    Semantic,
}

impl Signal {
    /// All signals in canonical order (lexical, latent, semantic)
    pub const ALL: [Signal; 3] = [Signal::Lexical, Signal::Latent, Signal::Semantic];

    /// File stem of this signal's matrix inside a bundle directory
    pub fn file_stem(self) -> &'static str {
        match self {
            Signal::Lexical => "tfidf_sim",
            Signal::Latent => "svd_sim",
            Signal::Semantic => "sbert_sim",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Lexical => "lexical",
            Signal::Latent => "latent",
            Signal::Semantic => "semantic",
        };
        f.write_str(name)
    }
}

// =============================================================================
// SimilarityMatrix
// =============================================================================

/// Dense square matrix of similarity scores, stored row-major.
///
/// Entries are opaque ordered scalars: higher means more similar.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows.
    ///
    /// Fails with `NotSquare` if any row width differs from the row count.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != size {
                return Err(DataLoadError::NotSquare {
                    rows: size,
                    row,
                    cols: cells.len(),
                });
            }
            values.extend(cells);
        }
        Ok(Self { size, values })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Borrow row `i`. Panics if `i` is out of range.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Entry (i, j), or `None` if out of range
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }

    /// Position of the first NaN or infinite entry, if any
    fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.values
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / self.size, idx % self.size))
    }
}

// =============================================================================
// SimilarityStore
// =============================================================================

/// The immutable bundle of catalog plus three aligned similarity matrices.
///
/// There are no mutators: once constructed (and validated) the store is
/// read-only, so it can be shared across threads behind an `Arc` without a lock.
#[derive(Debug)]
pub struct SimilarityStore {
    movies: Vec<Movie>,
    /// Title -> first catalog position carrying that title
    title_index: HashMap<String, usize>,
    lexical: SimilarityMatrix,
    latent: SimilarityMatrix,
    semantic: SimilarityMatrix,
}

impl SimilarityStore {
    /// Assemble a store, validating that all four parts are aligned.
    ///
    /// Checks:
    /// - the catalog is non-empty
    /// - every matrix is N x N for N catalog entries
    /// - every matrix entry is finite
    pub fn new(
        movies: Vec<Movie>,
        lexical: SimilarityMatrix,
        latent: SimilarityMatrix,
        semantic: SimilarityMatrix,
    ) -> Result<Self> {
        if movies.is_empty() {
            return Err(DataLoadError::EmptyCatalog);
        }

        let expected = movies.len();
        for (signal, matrix) in Signal::ALL.into_iter().zip([&lexical, &latent, &semantic]) {
            if matrix.size() != expected {
                return Err(DataLoadError::DimensionMismatch {
                    signal,
                    expected,
                    size: matrix.size(),
                });
            }
            if let Some((row, col)) = matrix.first_non_finite() {
                return Err(DataLoadError::NonFiniteValue { signal, row, col });
            }
        }

        // First match wins for duplicate titles
        let mut title_index = HashMap::with_capacity(movies.len());
        for (position, movie) in movies.iter().enumerate() {
            title_index.entry(movie.title.clone()).or_insert(position);
        }

        Ok(Self {
            movies,
            title_index,
            lexical,
            latent,
            semantic,
        })
    }

    /// Number of catalog entries (N)
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Always false for a constructed store; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// The catalog in index order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Movie at a catalog position
    pub fn movie(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    /// Catalog position of the first movie with exactly this title
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    /// Known titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// The matrix for one signal
    pub fn matrix(&self, signal: Signal) -> &SimilarityMatrix {
        match signal {
            Signal::Lexical => &self.lexical,
            Signal::Latent => &self.latent,
            Signal::Semantic => &self.semantic,
        }
    }

    /// Similarities of every catalog movie to the movie at `position`
    pub fn row(&self, signal: Signal, position: usize) -> &[f32] {
        self.matrix(signal).row(position)
    }
}
