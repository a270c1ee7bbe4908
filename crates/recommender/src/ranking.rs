//! Ranking, working-set selection and seed exclusion.
//!
//! Seeds usually score highest (they are maximally similar to themselves), so
//! the top `top_n + |seeds|` positions are taken first and seeds are removed
//! from that working set afterwards. This keeps the result full without a
//! second pass over the catalog.

use data_loader::SimilarityStore;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Catalog positions ordered by descending score.
///
/// The sort is stable: tied positions keep their catalog order. NaN scores
/// rank below every number.
pub fn rank_positions(scores: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| descending(scores[a], scores[b]));
    order
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Pick the final positions from a ranking.
///
/// 1. Take the working set: the first `top_n + seeds.len()` ranked positions
/// 2. Drop every position whose title is one of the seed titles
/// 3. Keep at most `top_n`
///
/// Returns fewer than `top_n` positions when the working set runs out.
pub fn select<S: AsRef<str>>(
    store: &SimilarityStore,
    ranked: &[usize],
    seeds: &[S],
    top_n: usize,
) -> Vec<usize> {
    let seed_titles: HashSet<&str> = seeds.iter().map(AsRef::as_ref).collect();
    let working_set = top_n.saturating_add(seeds.len());

    ranked
        .iter()
        .copied()
        .take(working_set)
        .filter(|&position| {
            store
                .movie(position)
                .is_some_and(|movie| !seed_titles.contains(movie.title.as_str()))
        })
        .take(top_n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, SimilarityMatrix};

    fn create_test_store(titles: &[&str]) -> SimilarityStore {
        let n = titles.len();
        let identity: Vec<Vec<f32>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        let matrix = SimilarityMatrix::from_rows(identity).unwrap();
        let movies = titles
            .iter()
            .map(|title| Movie {
                id: None,
                title: title.to_string(),
                genres: vec![],
            })
            .collect();
        SimilarityStore::new(movies, matrix.clone(), matrix.clone(), matrix).unwrap()
    }

    #[test]
    fn test_rank_descending() {
        assert_eq!(rank_positions(&[0.1, 0.9, 0.5]), vec![1, 2, 0]);
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        assert_eq!(rank_positions(&[0.5, 0.7, 0.5, 0.7, 0.5]), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_rank_nan_sorts_last() {
        assert_eq!(rank_positions(&[f32::NAN, 0.2, 0.8]), vec![2, 1, 0]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_positions(&[]).is_empty());
    }

    #[test]
    fn test_select_removes_seeds() {
        let store = create_test_store(&["A", "B", "C", "D"]);
        let selected = select(&store, &[0, 3, 2, 1], &["A"], 2);
        assert_eq!(selected, vec![3, 2]);
    }

    #[test]
    fn test_select_truncates_when_catalog_runs_out() {
        let store = create_test_store(&["A", "B", "C"]);
        let selected = select(&store, &[0, 1, 2], &["A"], 10);
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn test_select_only_looks_at_working_set() {
        // Working set is 1 + 1 = 2 positions: [B, C]. No seed falls inside it,
        // so the result is just the first non-seed.
        let store = create_test_store(&["A", "B", "C", "D"]);
        let selected = select(&store, &[1, 2, 3, 0], &["A"], 1);
        assert_eq!(selected, vec![1]);
    }

    #[test]
    fn test_select_excludes_duplicate_titles_of_seeds() {
        let store = create_test_store(&["A", "B", "A", "C"]);
        let selected = select(&store, &[0, 2, 1, 3], &["A"], 2);
        // Both "A" rows are removed; the working set of 3 only leaves B.
        assert_eq!(selected, vec![1]);
    }
}
