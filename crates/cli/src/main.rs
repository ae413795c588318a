use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, CatalogLimits, parser};
use rand::seq::IndexedRandom;
use recommender::report::{RecommendationReport, write_report};
use recommender::{RecommendationOutcome, Recommender};
use similarity::SimilarityResult;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing::{info, warn};

/// ReelRecs - Nearest-neighbour movie recommendations
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Recommend unseen movies from the most similar user (Jaccard similarity)", long_about = None)]
struct Cli {
    /// Path to the user catalog (JSON array of users)
    #[arg(short, long, default_value = "Fichiers_json/ListeUtilisateurs.json")]
    catalog: PathBuf,

    /// Keep at most this many users from the catalog
    #[arg(long)]
    max_users: Option<usize>,

    /// Keep at most this many rated titles per user
    #[arg(long)]
    max_titles: Option<usize>,

    /// Apply the 50 users / 50 titles caps of the legacy tool
    #[arg(long, conflicts_with_all = ["max_users", "max_titles"])]
    legacy_limits: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies to the target user and write the report
    Recommend {
        /// File holding the target username as {"target": "..."}
        #[arg(long, default_value = "Fichiers_json/target_user.json")]
        target_file: PathBuf,

        /// Target username (takes precedence over --target-file)
        #[arg(long)]
        target: Option<String>,

        /// Where to write the recommendation report
        #[arg(short, long, default_value = "Fichiers_json/recommendations.json")]
        output: PathBuf,

        /// Give up if the recommendation takes longer than this
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// List the users most similar to a user
    Similar {
        /// Username to compare against
        #[arg(long)]
        user: String,

        /// Number of users to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show a user and their rated titles
    User {
        /// Username to display
        #[arg(long)]
        name: String,
    },

    /// Run recommendations for random users to measure latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

impl Cli {
    fn limits(&self) -> CatalogLimits {
        if self.legacy_limits {
            return CatalogLimits::legacy();
        }
        CatalogLimits {
            max_users: self.max_users,
            max_titles_per_user: self.max_titles,
        }
    }
}

fn main() -> Result<()> {
    let runtime = Runtime::new().context("Failed to start the async runtime")?;
    run_to_completion(runtime, run())
}

/// Drive `future` on `runtime`, then shut the runtime down without waiting
/// for blocking tasks that are still running after a missed deadline.
fn run_to_completion<F: Future>(runtime: Runtime, future: F) -> F::Output {
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    output
}

async fn run() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog
    let start = Instant::now();
    let catalog = parser::parse_catalog(&cli.catalog, cli.limits())
        .with_context(|| format!("Failed to load user catalog {}", cli.catalog.display()))?;
    if catalog.is_empty() {
        bail!("No users loaded from {}", cli.catalog.display());
    }
    println!(
        "{} Loaded {} users in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    let report = catalog.report();
    if report.is_truncated() {
        println!(
            "{} Catalog truncated: {} users and {} rated titles dropped",
            "!".yellow(),
            report.users_dropped,
            report.titles_dropped
        );
    }

    let recommender = Recommender::new(Arc::new(catalog));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            target_file,
            target,
            output,
            timeout_ms,
        } => {
            let target = match target {
                Some(target) => target,
                None => parser::parse_target(&target_file).with_context(|| {
                    format!("Failed to read target user from {}", target_file.display())
                })?,
            };
            let timeout = timeout_ms.map(Duration::from_millis);
            handle_recommend(recommender, target, output, timeout).await?
        }
        Commands::Similar { user, limit } => handle_similar(&recommender, &user, limit)?,
        Commands::User { name } => handle_user(recommender.catalog(), &name)?,
        Commands::Benchmark { requests } => handle_benchmark(&recommender, requests)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    recommender: Recommender,
    target: String,
    output: PathBuf,
    timeout: Option<Duration>,
) -> Result<()> {
    println!("Target user: {}", target.bold());

    // The computation is synchronous; run it off the async workers so the
    // deadline can fire while it is still going.
    let task = tokio::task::spawn_blocking(move || recommender.recommend(&target));
    let outcome = match timeout {
        Some(limit) => tokio::time::timeout(limit, task)
            .await
            .map_err(|_| anyhow!("Recommendation did not finish within {:?}", limit))?,
        None => task.await,
    }
    .context("Recommendation task panicked")?;

    match &outcome {
        RecommendationOutcome::Recommended(set) | RecommendationOutcome::NothingNew(set) => {
            print_recommendations(&outcome);
            write_report(&output, &RecommendationReport::from(set))?;
            println!(
                "{} {} written with {} recommended titles",
                "✓".green(),
                output.display(),
                set.titles.len()
            );
        }
        RecommendationOutcome::TargetNotFound { .. } | RecommendationOutcome::NoOtherUsers { .. } => {
            warn!(outcome = outcome.kind(), "No report written: {}", outcome);
            println!("{} {}", "✗".red(), outcome);
        }
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(recommender: &Recommender, username: &str, limit: usize) -> Result<()> {
    let catalog = recommender.catalog();
    let (position, _) = catalog
        .find_by_username(username)
        .ok_or_else(|| anyhow!("User {} not found", username))?;

    let ranked: Vec<SimilarityResult> = recommender.engine().rank_candidates(catalog, position);
    println!("{}", format!("Users most similar to {}:", username).bold().blue());
    if ranked.is_empty() {
        println!("  (no other users)");
    }
    for (rank, result) in ranked.iter().take(limit).enumerate() {
        let shared = result
            .user
            .rated_titles
            .iter()
            .filter(|t| catalog.users()[position].rated_titles.contains(t))
            .count();
        println!(
            "{}. {} - similarity {:.3} ({} shared of {} rated)",
            (rank + 1).to_string().green(),
            result.user.username,
            result.score,
            shared,
            result.user.rated_titles.len()
        );
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(catalog: &Catalog, name: &str) -> Result<()> {
    let (position, user) = catalog
        .find_by_username(name)
        .ok_or_else(|| anyhow!("User {} not found", name))?;

    println!("{}", format!("User: {}", user.username).bold().blue());
    println!("{}Id: {}", "• ".green(), user.user_id);
    println!("{}Catalog position: {}", "• ".green(), position);
    println!("{}Rated titles: {}", "• ".cyan(), user.rated_titles.len());
    for title in user.rated_titles.iter() {
        println!("  - {}", title);
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(recommender: &Recommender, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Pick random target usernames from the catalog
    let usernames: Vec<&str> = recommender.catalog().usernames().collect();
    let mut rng = rand::rng();
    let targets: Vec<String> = (0..requests)
        .filter_map(|_| usernames.choose(&mut rng).map(|name| name.to_string()))
        .collect();

    // Time each request individually, then the whole parallel batch
    let mut timings: Vec<Duration> = targets
        .iter()
        .map(|target| {
            let start = Instant::now();
            recommender.recommend(target);
            start.elapsed()
        })
        .collect();

    let batch_start = Instant::now();
    let outcomes = recommender.recommend_many(&targets);
    let batch_time = batch_start.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let p99 = timings[((timings.len() as f32 * 0.99) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / batch_time.as_secs_f32();

    let with_titles = outcomes
        .iter()
        .filter(|o| matches!(o, RecommendationOutcome::Recommended(_)))
        .count();
    info!("{} of {} requests produced recommendations", with_titles, requests);

    println!("Benchmark results:");
    println!("Sequential time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Parallel batch time: {:?}", batch_time);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print a recommendation outcome
fn print_recommendations(outcome: &RecommendationOutcome) {
    let Some(set) = outcome.recommendation_set() else {
        return;
    };

    println!(
        "Most similar to {} is {} (similarity {:.3})",
        set.target.bold(),
        set.matched_user.bold(),
        set.similarity
    );
    if set.is_empty() {
        println!("No recommendation for {} (everything already rated)", set.target);
        return;
    }

    print!("{}", format!("Recommendations for {}:\n", set.target).bold().blue());
    for (rank, title) in set.titles.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), title);
    }
}
