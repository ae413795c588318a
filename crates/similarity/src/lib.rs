//! # Similarity Crate
//!
//! Pairwise user similarity for nearest-neighbour recommendations.
//!
//! ## Components
//!
//! ### Jaccard
//! Set similarity over rated titles: shared titles divided by all titles
//! either user rated. Only the presence of a rating counts, not its value.
//!
//! ### SimilarityEngine
//! Scores a target user against every other user of a `Catalog`, in catalog
//! order, through a pluggable `SimilarityMeasure`.
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::SimilarityEngine;
//!
//! let engine = SimilarityEngine::new();
//! let (position, _) = catalog.find_by_username("Alice").unwrap();
//!
//! for result in engine.rank_candidates(&catalog, position) {
//!     println!("{} {:.3}", result.user.username, result.score);
//! }
//! ```

// Public modules
pub mod jaccard;
pub mod engine;

// Re-export commonly used types
pub use jaccard::{Jaccard, SimilarityMeasure, jaccard};
pub use engine::{SimilarityEngine, SimilarityResult};
