use data_loader::SimilarityStore;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data/tmdb-5000");

    println!("Loading similarity bundle...\n");

    let start = Instant::now();
    let store = SimilarityStore::load_from_dir(data_dir)
        .expect("Failed to load similarity bundle");
    let elapsed = start.elapsed();

    let n = store.len();
    let cells = 3 * n * n;

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", n);
    println!("Similarity entries: {}", cells);
    println!("\nPerformance: {:.0} entries/second",
             cells as f64 / elapsed.as_secs_f64());
}
