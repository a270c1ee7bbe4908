//! Integration tests for the recommender.
//!
//! These run the public `recommend` entry points against small hand-built
//! stores whose blended scores can be checked by hand.

use data_loader::{Movie, SimilarityMatrix, SimilarityStore};
use recommender::{BlendWeights, RecommendError, Recommender, recommend, recommend_scored};
use std::sync::Arc;

fn movie(id: u32, title: &str, genres: &[&str]) -> Movie {
    Movie {
        id: Some(id),
        title: title.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

fn matrix(rows: &[&[f32]]) -> SimilarityMatrix {
    SimilarityMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

/// Catalog [A, B, C, D] with A's rows taken from the worked example:
/// with weights (0.2, 0.3, 0.5) and seed A, B = 0.49, C = 0.51, D = 0.58.
fn create_test_setup() -> SimilarityStore {
    let movies = vec![
        movie(1, "A", &["Action"]),
        movie(2, "B", &["Drama"]),
        movie(3, "C", &["Comedy", "Romance"]),
        movie(4, "D", &["Science Fiction"]),
    ];

    let lexical = matrix(&[
        &[1.0, 0.9, 0.1, 0.2],
        &[0.9, 1.0, 0.3, 0.4],
        &[0.1, 0.3, 1.0, 0.5],
        &[0.2, 0.4, 0.5, 1.0],
    ]);
    let latent = matrix(&[
        &[1.0, 0.2, 0.8, 0.3],
        &[0.2, 1.0, 0.4, 0.6],
        &[0.8, 0.4, 1.0, 0.7],
        &[0.3, 0.6, 0.7, 1.0],
    ]);
    let semantic = matrix(&[
        &[1.0, 0.5, 0.5, 0.9],
        &[0.5, 1.0, 0.2, 0.1],
        &[0.5, 0.2, 1.0, 0.6],
        &[0.9, 0.1, 0.6, 1.0],
    ]);

    SimilarityStore::new(movies, lexical, latent, semantic).unwrap()
}

fn titles(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.title.as_str()).collect()
}

#[test]
fn test_worked_example() {
    let store = create_test_setup();
    let weights = BlendWeights::new(0.2, 0.3, 0.5);

    let scored = recommend_scored(&store, &["A"], &weights, 2).unwrap();

    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].movie.title, "D");
    assert!((scored[0].score - 0.58).abs() < 1e-5);
    assert_eq!(scored[1].movie.title, "C");
    assert!((scored[1].score - 0.51).abs() < 1e-5);
}

#[test]
fn test_results_keep_all_catalog_fields() {
    let store = create_test_setup();

    let result = recommend(&store, &["A"], &BlendWeights::new(0.2, 0.3, 0.5), 1).unwrap();

    assert_eq!(result, vec![movie(4, "D", &["Science Fiction"])]);
}

#[test]
fn test_repeated_calls_are_identical() {
    let store = create_test_setup();
    let weights = BlendWeights::default();

    let first = recommend(&store, &["B", "C"], &weights, 3).unwrap();
    for _ in 0..10 {
        assert_eq!(recommend(&store, &["B", "C"], &weights, 3).unwrap(), first);
    }
}

#[test]
fn test_seeds_never_returned() {
    let store = create_test_setup();
    let weights = BlendWeights::default();
    let seed_sets: [&[&str]; 5] = [&["A"], &["B"], &["A", "D"], &["C", "B", "A"], &["D", "D"]];

    for seeds in seed_sets {
        for top_n in 1..=5 {
            let result = recommend(&store, seeds, &weights, top_n).unwrap();
            for title in titles(&result) {
                assert!(!seeds.contains(&title), "seed {} returned for {:?}", title, seeds);
            }
        }
    }
}

#[test]
fn test_result_size_bound() {
    let store = create_test_setup();
    let weights = BlendWeights::default();

    for top_n in 1..=6 {
        let single = recommend(&store, &["A"], &weights, top_n).unwrap();
        assert_eq!(single.len(), top_n.min(3));

        let pair = recommend(&store, &["A", "B"], &weights, top_n).unwrap();
        assert_eq!(pair.len(), top_n.min(2));
    }

    // The same seed twice still occupies one catalog position
    let doubled = recommend(&store, &["C", "C"], &weights, 10).unwrap();
    assert_eq!(doubled.len(), 3);
}

#[test]
fn test_single_seed_is_weighted_row() {
    let store = create_test_setup();
    let weights = BlendWeights::new(0.6, 0.1, 0.3);

    let scored = recommend_scored(&store, &["B"], &weights, 3).unwrap();

    for row in scored {
        let j = row.position;
        let expected = 0.6 * store.row(data_loader::Signal::Lexical, 1)[j]
            + 0.1 * store.row(data_loader::Signal::Latent, 1)[j]
            + 0.3 * store.row(data_loader::Signal::Semantic, 1)[j];
        assert!((row.score - expected).abs() < 1e-6);
    }
}

#[test]
fn test_multi_seed_averages_per_seed_sums() {
    let store = create_test_setup();
    let weights = BlendWeights::new(0.2, 0.3, 0.5);

    let scored = recommend_scored(&store, &["A", "D"], &weights, 5).unwrap();

    // B = (0.49 + 0.31) / 2, C = (0.51 + 0.61) / 2
    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].movie.title, "C");
    assert!((scored[0].score - 0.56).abs() < 1e-5);
    assert_eq!(scored[1].movie.title, "B");
    assert!((scored[1].score - 0.40).abs() < 1e-5);
}

#[test]
fn test_semantic_weight_lifts_semantic_candidate() {
    let store = SimilarityStore::new(
        vec![movie(1, "Seed", &[]), movie(2, "Wordy", &[]), movie(3, "Meaningful", &[])],
        matrix(&[&[1.0, 0.9, 0.1], &[0.9, 1.0, 0.0], &[0.1, 0.0, 1.0]]),
        matrix(&[&[1.0, 0.9, 0.1], &[0.9, 1.0, 0.0], &[0.1, 0.0, 1.0]]),
        matrix(&[&[1.0, 0.1, 0.9], &[0.1, 1.0, 0.0], &[0.9, 0.0, 1.0]]),
    )
    .unwrap();

    let rank_of = |semantic: f32| {
        let weights = BlendWeights::new(0.5, 0.5, semantic);
        let result = recommend(&store, &["Seed"], &weights, 2).unwrap();
        titles(&result).iter().position(|t| *t == "Meaningful").unwrap()
    };

    // 0.19 vs 0.91 with semantic = 0.1; 1.9 vs 1.1 with semantic = 2.0
    assert_eq!(rank_of(0.1), 1);
    assert_eq!(rank_of(2.0), 0);
}

#[test]
fn test_unknown_title() {
    let store = create_test_setup();

    let err = recommend(&store, &["NoSuchMovie_ZZZ"], &BlendWeights::default(), 5).unwrap_err();

    assert_eq!(err, RecommendError::not_found("NoSuchMovie_ZZZ"));
    assert_eq!(err.to_string(), "Movie 'NoSuchMovie_ZZZ' not found!");
}

#[test]
fn test_unknown_title_among_valid_ones() {
    let store = create_test_setup();

    let err = recommend(&store, &["A", "Nope", "B"], &BlendWeights::default(), 5).unwrap_err();

    assert_eq!(err, RecommendError::not_found("Nope"));
}

#[test]
fn test_zero_weights() {
    let store = create_test_setup();

    let err = recommend(&store, &["A"], &BlendWeights::new(0.0, 0.0, 0.0), 2).unwrap_err();

    assert!(matches!(err, RecommendError::InvalidWeights { .. }));
}

#[test]
fn test_candidate_tied_with_seed_is_eligible() {
    let m = matrix(&[&[1.0, 1.0, 0.5], &[1.0, 1.0, 0.5], &[0.5, 0.5, 1.0]]);
    let store = SimilarityStore::new(
        vec![movie(1, "Original", &[]), movie(2, "Remake", &[]), movie(3, "Other", &[])],
        m.clone(),
        m.clone(),
        m,
    )
    .unwrap();

    let result = recommend(&store, &["Original"], &BlendWeights::default(), 1).unwrap();

    assert_eq!(titles(&result), vec!["Remake"]);
}

#[test]
fn test_ties_resolved_by_catalog_order() {
    let flat = matrix(&[
        &[1.0, 0.4, 0.4, 0.4],
        &[0.4, 1.0, 0.4, 0.4],
        &[0.4, 0.4, 1.0, 0.4],
        &[0.4, 0.4, 0.4, 1.0],
    ]);
    let store = SimilarityStore::new(
        vec![movie(1, "W", &[]), movie(2, "X", &[]), movie(3, "Y", &[]), movie(4, "Z", &[])],
        flat.clone(),
        flat.clone(),
        flat,
    )
    .unwrap();

    let result = recommend(&store, &["Y"], &BlendWeights::default(), 3).unwrap();

    assert_eq!(titles(&result), vec!["W", "X", "Z"]);
}

#[test]
fn test_shared_recommender_across_threads() {
    let recommender = Recommender::new(Arc::new(create_test_setup()));
    let expected = recommender.recommend(&["A"], &BlendWeights::default(), 2).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let recommender = recommender.clone();
            std::thread::spawn(move || {
                recommender.recommend(&["A"], &BlendWeights::default(), 2).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
