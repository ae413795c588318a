use data_loader::{CatalogLimits, parser};
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("Fichiers_json/ListeUtilisateurs.json");

    println!("Loading user catalog...\n");

    let start = Instant::now();
    let catalog = parser::parse_catalog(path, CatalogLimits::default())
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let (users, titles) = catalog.counts();
    let report = catalog.report();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Rated titles: {}", titles);
    if report.is_truncated() {
        println!(
            "Truncated: {} users and {} titles dropped",
            report.users_dropped, report.titles_dropped
        );
    }
}
