//! # Data Loader Crate
//!
//! This crate loads the similarity bundle: the movie catalog plus three
//! precomputed, aligned N x N similarity matrices (TF-IDF, SVD, SBERT).
//!
//! ## Main Components
//!
//! - **types**: Domain types (Movie, Signal, SimilarityMatrix, SimilarityStore)
//! - **parser**: Parse .dat files into Rust structs
//! - **index**: Load and validate a whole bundle directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Signal, SimilarityStore};
//! use std::path::Path;
//!
//! let store = SimilarityStore::load_from_dir(Path::new("data/tmdb-5000"))?;
//!
//! let avatar = store.position_of("Avatar").unwrap();
//! let row = store.row(Signal::Semantic, avatar);
//! println!("{} movies, first similarity {}", store.len(), row[0]);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{MOVIES_FILE, matrix_path};
pub use types::{Movie, MovieId, Signal, SimilarityMatrix, SimilarityStore};

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str) -> Movie {
        Movie {
            id: None,
            title: title.to_string(),
            genres: vec![],
        }
    }

    fn matrix(rows: &[&[f32]]) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_store_creation() {
        let m = matrix(&[&[1.0, 0.3], &[0.3, 1.0]]);
        let store =
            SimilarityStore::new(vec![movie("A"), movie("B")], m.clone(), m.clone(), m).unwrap();

        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        assert_eq!(store.titles().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(store.movie(1).map(|m| m.title.as_str()), Some("B"));
        assert!(store.movie(2).is_none());
    }

    #[test]
    fn test_duplicate_titles_first_match_wins() {
        let m = matrix(&[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]]);
        let movies = vec![movie("A"), movie("B"), movie("A")];
        let store = SimilarityStore::new(movies, m.clone(), m.clone(), m).unwrap();

        assert_eq!(store.position_of("A"), Some(0));
        assert_eq!(store.position_of("B"), Some(1));
        assert_eq!(store.position_of("a"), None);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let m = SimilarityMatrix::from_rows(vec![]).unwrap();
        let err = SimilarityStore::new(vec![], m.clone(), m.clone(), m).unwrap_err();
        assert!(matches!(err, DataLoadError::EmptyCatalog));
    }

    #[test]
    fn test_matrix_row_and_get() {
        let m = matrix(&[&[1.0, 0.9], &[0.9, 1.0]]);
        assert_eq!(m.size(), 2);
        assert_eq!(m.row(1), &[0.9, 1.0]);
        assert_eq!(m.get(0, 1), Some(0.9));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_signal_file_stems() {
        let stems: Vec<_> = Signal::ALL.iter().map(|s| s.file_stem()).collect();
        assert_eq!(stems, vec!["tfidf_sim", "svd_sim", "sbert_sim"]);
        assert_eq!(Signal::Semantic.to_string(), "semantic");
    }
}
