use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::SimilarityStore;
use poster_client::TmdbPosterClient;
use recommender::{BlendWeights, RecommendError};
use server::{MovieRecommendation, RecommendationRequest, RecommendationService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// ReelRecs - Hybrid Movie Recommender
///
/// Recommends movies similar to your favorites by blending TF-IDF, SVD and SBERT similarity
#[derive(Parser)]
#[command(name = "reel-recs", long_about = None)]
struct Cli {
    /// Directory holding movies.dat and the tfidf/svd/sbert similarity matrices
    #[arg(short, long, env = "REEL_RECS_DATA_DIR", default_value = "data/tmdb-5000")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to one or more favorites
    Recommend {
        /// Favorite movie title, exactly as listed by `titles` (repeat for several)
        #[arg(long = "title", required = true)]
        titles: Vec<String>,

        /// TF-IDF weight, 0.0 to 1.0
        #[arg(long, default_value_t = 0.2, value_parser = parse_weight)]
        tfidf_weight: f32,

        /// SVD weight, 0.0 to 1.0
        #[arg(long, default_value_t = 0.3, value_parser = parse_weight)]
        svd_weight: f32,

        /// SBERT weight, 0.0 to 1.0
        #[arg(long, default_value_t = 0.5, value_parser = parse_weight)]
        sbert_weight: f32,

        /// How many recommendations to return
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=20))]
        top_n: u8,

        #[command(flatten)]
        posters: PosterArgs,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the known titles in catalog order
    Titles {
        /// Only show the first N titles
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Seed titles per request
        #[arg(long, default_value = "2")]
        seeds: usize,
    },
}

#[derive(Args)]
struct PosterArgs {
    /// TMDB API key; posters are skipped when it is not set
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: Option<String>,

    /// TMDB API root
    #[arg(long, env = "TMDB_API_URL", default_value = poster_client::DEFAULT_API_URL)]
    tmdb_api_url: String,
}

/// Parse a blend weight, accepting only values in [0, 1]
fn parse_weight(s: &str) -> std::result::Result<f32, String> {
    let weight: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(0.0..=1.0).contains(&weight) {
        return Err(format!("weight must be between 0.0 and 1.0, got {}", weight));
    }
    Ok(weight)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Nothing runs against a partial store: a load failure ends the process here
    let start = Instant::now();
    let store = Arc::new(SimilarityStore::load_from_dir(&cli.data_dir).with_context(|| {
        format!("Failed to load similarity bundle from {}", cli.data_dir.display())
    })?);
    info!("Loaded {} movies in {:?}", store.len(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            titles,
            tfidf_weight,
            svd_weight,
            sbert_weight,
            top_n,
            posters,
            json,
        } => {
            let request = RecommendationRequest {
                seeds: titles,
                weights: BlendWeights::new(tfidf_weight, svd_weight, sbert_weight),
                top_n: top_n as usize,
            };
            handle_recommend(store, request, posters, json).await?
        }
        Commands::Titles { limit } => handle_titles(&store, limit),
        Commands::Search { title } => handle_search(&store, &title),
        Commands::Benchmark {
            requests,
            concurrent,
            seeds,
        } => handle_benchmark(store, requests, concurrent, seeds).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    store: Arc<SimilarityStore>,
    request: RecommendationRequest,
    posters: PosterArgs,
    json: bool,
) -> Result<()> {
    let mut service = RecommendationService::new(store);
    if let Some(api_key) = posters.tmdb_api_key {
        let client = TmdbPosterClient::new(api_key).with_api_url(posters.tmdb_api_url);
        service = service.with_posters(Arc::new(client));
    }

    let recommendations = match service.get_recommendations(&request).await {
        Ok(recommendations) => recommendations,
        Err(err) => {
            // Already explained to the user; skip anyhow's error report
            if let Some(explanation) = explain_failure(&err) {
                eprintln!("{}", explanation);
                std::process::exit(1);
            }
            return Err(err);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations(&request.seeds, &recommendations);
    }
    Ok(())
}

/// Failed precondition and its fix, when the error came from the recommender
fn explain_failure(err: &anyhow::Error) -> Option<String> {
    let reason = err.downcast_ref::<RecommendError>()?;
    Some(format!("{} {}\n  {}", "✗".red(), reason, remedy(reason).yellow()))
}

/// What the user should change for each failed precondition
fn remedy(err: &RecommendError) -> &'static str {
    match err {
        RecommendError::NotFound { .. } => {
            "Pick titles exactly as listed by `reel-recs titles` or found with `reel-recs search`."
        }
        RecommendError::InvalidWeights { .. } => {
            "Set at least one of --tfidf-weight, --svd-weight or --sbert-weight above zero."
        }
        RecommendError::EmptySeeds => "Pass at least one --title.",
        RecommendError::InvalidTopN => "Ask for at least one recommendation with --top-n.",
    }
}

/// Handle the 'titles' command
fn handle_titles(store: &SimilarityStore, limit: Option<usize>) {
    let limit = limit.unwrap_or(store.len());
    for (position, title) in store.titles().enumerate().take(limit) {
        println!("{:>5}  {}", position, title);
    }
}

/// Handle the 'search' command
fn handle_search(store: &SimilarityStore, title: &str) {
    let query = title.to_lowercase();

    // (relevance, catalog position): exact matches first, then substrings
    let mut matches: Vec<(u8, usize)> = store
        .movies()
        .iter()
        .enumerate()
        .filter_map(|(position, movie)| {
            let movie_title = movie.title.to_lowercase();
            if movie_title == query {
                Some((0, position))
            } else if movie_title.contains(&query) {
                Some((1, position))
            } else {
                None
            }
        })
        .collect();
    matches.sort();

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
        return;
    }
    for (_, position) in matches.iter().take(20) {
        if let Some(movie) = store.movie(*position) {
            println!("  {} [{}]", movie.title, movie.genres.join(", "));
        }
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    store: Arc<SimilarityStore>,
    requests: usize,
    concurrent: usize,
    seeds_per_request: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 || seeds_per_request == 0 {
        bail!("--requests, --concurrent and --seeds must all be positive");
    }

    let service = RecommendationService::new(store.clone());

    // Random seed sets drawn from the catalog
    let requests: Vec<RecommendationRequest> = (0..requests)
        .map(|_| RecommendationRequest {
            seeds: (0..seeds_per_request)
                .filter_map(|_| {
                    let position = rand::random::<u64>() as usize % store.len();
                    store.movie(position).map(|m| m.title.clone())
                })
                .collect(),
            weights: BlendWeights::default(),
            top_n: 20,
        })
        .collect();

    // At most `concurrent` requests in flight: spawn a wave, wait for it, repeat
    let wall_clock = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests.len());
    for wave in requests.chunks(concurrent) {
        let handles: Vec<_> = wave
            .iter()
            .cloned()
            .map(|request| {
                let service = service.clone();
                tokio::spawn(async move {
                    let start = Instant::now();
                    service.get_recommendations(&request).await?;
                    Ok::<_, anyhow::Error>(start.elapsed())
                })
            })
            .collect();

        for handle in handles {
            timings.push(handle.await??);
        }
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p).round() as usize];
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(seeds: &[String], recommendations: &[MovieRecommendation]) {
    println!(
        "{}",
        format!("Because you like {}:", seeds.join(", ")).bold().blue()
    );
    for rec in recommendations {
        println!(
            "{}. {} - Score: {:.3}",
            rec.rank.to_string().green(),
            rec.movie.title.bold(),
            rec.score
        );
        if !rec.movie.genres.is_empty() {
            println!("   {}", rec.movie.genres.join(", ").dimmed());
        }
        match &rec.poster_url {
            Some(url) => println!("   Poster: {}", url),
            None => println!("   {}", "No poster available".dimmed()),
        }
    }
}
