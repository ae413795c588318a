//! Recommender crate: nearest-neighbour title recommendations.
//!
//! This crate provides:
//! - `Recommender` and `recommend` for the resolve / score / select / diff pipeline
//! - Best-match selection with a deterministic tie-break
//! - Unseen-title derivation
//! - `RecommendationOutcome`, one variant per way a run can end
//! - The JSON recommendation report and its writer
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{Recommender, RecommendationOutcome};
//! use recommender::report::{write_report, RecommendationReport};
//!
//! let recommender = Recommender::new(Arc::new(catalog));
//! match recommender.recommend("Alice") {
//!     outcome @ (RecommendationOutcome::Recommended(_) | RecommendationOutcome::NothingNew(_)) => {
//!         let set = outcome.recommendation_set().unwrap();
//!         write_report(Path::new("recommendations.json"), &RecommendationReport::from(set))?;
//!     }
//!     other => println!("{}", other),
//! }
//! ```

pub mod outcome;
pub mod selection;
pub mod unseen;
pub mod orchestrator;
pub mod report;

// Re-export main types
pub use outcome::{RecommendationOutcome, RecommendationSet};
pub use orchestrator::{Recommender, recommend, recommend_with};
pub use report::{RecommendationReport, RecommendedTitle};
pub use selection::select_best_match;
pub use unseen::unseen_titles;
