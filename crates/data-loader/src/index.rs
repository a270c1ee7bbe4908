//! Loading a `SimilarityStore` from a bundle directory.
//!
//! The four files are parsed in parallel with rayon, then validated together.
//! Any failure aborts the whole load, so callers never see a partial store.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Name of the catalog file inside a bundle directory
pub const MOVIES_FILE: &str = "movies.dat";

/// Path of a signal's matrix file inside a bundle directory
pub fn matrix_path(data_dir: &Path, signal: Signal) -> std::path::PathBuf {
    data_dir.join(format!("{}.dat", signal.file_stem()))
}

impl SimilarityStore {
    /// Load the catalog and all three similarity matrices from a directory
    ///
    /// Steps:
    /// 1. Parse movies.dat and the three matrix files in parallel
    /// 2. Propagate the first parse error, if any
    /// 3. Validate alignment via `SimilarityStore::new`
    #[instrument(skip_all, fields(data_dir = %data_dir.display()))]
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading similarity bundle");
        let start = Instant::now();

        let movies_path = data_dir.join(MOVIES_FILE);
        let lexical_path = matrix_path(data_dir, Signal::Lexical);
        let latent_path = matrix_path(data_dir, Signal::Latent);
        let semantic_path = matrix_path(data_dir, Signal::Semantic);

        // Nested joins give four-way parallelism
        let ((movies, lexical), (latent, semantic)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_movies(&movies_path),
                    || parser::parse_matrix(&lexical_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_matrix(&latent_path),
                    || parser::parse_matrix(&semantic_path),
                )
            },
        );

        let movies = movies?;
        let lexical = lexical?;
        let latent = latent?;
        let semantic = semantic?;

        debug!(
            movies = movies.len(),
            lexical = lexical.size(),
            latent = latent.size(),
            semantic = semantic.size(),
            "Parsed bundle files"
        );

        let store = SimilarityStore::new(movies, lexical, latent, semantic)?;

        info!(
            movies = store.len(),
            elapsed = ?start.elapsed(),
            "Similarity bundle loaded and validated"
        );
        Ok(store)
    }
}
