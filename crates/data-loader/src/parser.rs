//! Parser for the similarity bundle files.
//!
//! - movies.dat: id::title::genres (id may be empty, genres are pipe-separated)
//! - tfidf_sim.dat, svd_sim.dat, sbert_sim.dat: one matrix row per line,
//!   values separated by commas and/or whitespace

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;

/// Read a bundle file, mapping a missing file to `FileNotFound`
fn read_to_string(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// File name used in error messages
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.dat file
///
/// Line order defines catalog position, so blank lines are skipped but never
/// reordered.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = read_to_string(path)?;
    parse_movies_str(&content, &file_label(path))
}

pub(crate) fn parse_movies_str(content: &str, file: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.splitn(3, "::");

        let id = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing id".to_string(),
        })?;

        let title = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing title".to_string(),
        })?;

        let genres = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing genres".to_string(),
        })?;

        if title.trim().is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Empty title".to_string(),
            });
        }

        movies.push(Movie {
            id: parse_movie_id(id).map_err(|reason| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason,
            })?,
            title: title.to_string(),
            genres: parse_genres(genres),
        });
    }

    Ok(movies)
}

/// Parse one similarity matrix file
pub fn parse_matrix(path: &Path) -> Result<SimilarityMatrix> {
    let content = read_to_string(path)?;
    parse_matrix_str(&content, &file_label(path))
}

pub(crate) fn parse_matrix_str(content: &str, file: &str) -> Result<SimilarityMatrix> {
    let mut rows: Vec<Vec<f32>> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let row = line_trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|cell| !cell.is_empty())
            .map(|cell| {
                cell.parse::<f32>().map_err(|e| DataLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: format!("Invalid similarity '{}': {}", cell, e),
                })
            })
            .collect::<Result<Vec<f32>>>()?;

        // Catch ragged rows here, where the line number is still known
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(DataLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: format!("Expected {} values but found {}", first.len(), row.len()),
                });
            }
        }

        rows.push(row);
    }

    SimilarityMatrix::from_rows(rows)
}

/// Parse an optional catalog id
///
/// Example: "19995" -> Ok(Some(19995))
///          ""      -> Ok(None)
fn parse_movie_id(s: &str) -> std::result::Result<Option<MovieId>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<MovieId>()
        .map(Some)
        .map_err(|e| format!("Invalid id: {}", e))
}

/// Parse pipe-separated genres
///
/// Example: "Action|Science Fiction" -> vec!["Action", "Science Fiction"]
///          ""                       -> vec![]
fn parse_genres(s: &str) -> Vec<String> {
    s.split('|')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}
