//! Error types for the data-loader crate.
//!
//! Every failure while reading the similarity bundle ends up here. A load
//! either produces a complete, aligned store or one of these errors; there
//! is no partially loaded state.

use crate::types::Signal;
use thiserror::Error;

/// Errors that can occur while loading or validating a similarity store
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The catalog has no movies
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Matrix rows have inconsistent widths or the matrix is not square
    #[error("Matrix is not square: {rows} rows but row {row} has {cols} values")]
    NotSquare { rows: usize, row: usize, cols: usize },

    /// A matrix size disagrees with the catalog size
    #[error("{signal} matrix is {size}x{size} but the catalog has {expected} movies")]
    DimensionMismatch {
        signal: Signal,
        expected: usize,
        size: usize,
    },

    /// A similarity entry is NaN or infinite
    #[error("{signal} matrix has a non-finite value at ({row}, {col})")]
    NonFiniteValue {
        signal: Signal,
        row: usize,
        col: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
