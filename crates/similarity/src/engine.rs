//! SimilarityEngine - scores a target user against every candidate
//!
//! ## Algorithm
//! 1. Walk the catalog in order, skipping the target's own position
//! 2. Score each candidate against the target with the configured measure
//! 3. Return results in catalog order (ranking is left to the caller)

use crate::jaccard::{Jaccard, SimilarityMeasure};
use data_loader::{Catalog, User};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Similarity between the target and one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityResult<'a> {
    /// Catalog position of the candidate
    pub position: usize,
    pub user: &'a User,
    /// Score in `[0.0, 1.0]`
    pub score: f64,
}

/// Pairwise scorer shared by every recommendation call.
///
/// Holds no per-call state, so one engine can serve concurrent callers.
#[derive(Clone)]
pub struct SimilarityEngine {
    measure: Arc<dyn SimilarityMeasure>,
}

impl SimilarityEngine {
    /// Create an engine using Jaccard similarity
    pub fn new() -> Self {
        Self {
            measure: Arc::new(Jaccard),
        }
    }

    /// Replace the similarity measure
    pub fn with_measure(mut self, measure: impl SimilarityMeasure + 'static) -> Self {
        self.measure = Arc::new(measure);
        self
    }

    pub fn measure_name(&self) -> &str {
        self.measure.name()
    }

    /// Similarity between two users
    pub fn score(&self, a: &User, b: &User) -> f64 {
        self.measure.similarity(&a.rated_titles, &b.rated_titles)
    }

    /// Score every user except the one at `target_position`, in catalog order
    #[instrument(skip(self, catalog))]
    pub fn score_candidates<'a>(
        &self,
        catalog: &'a Catalog,
        target_position: usize,
    ) -> Vec<SimilarityResult<'a>> {
        let Some(target) = catalog.get_user(target_position) else {
            return Vec::new();
        };

        let results: Vec<SimilarityResult<'a>> = catalog
            .candidates(target_position)
            .map(|(position, user)| SimilarityResult {
                position,
                user,
                score: self.score(target, user),
            })
            .collect();

        debug!(
            "Scored {} candidates for {} with {}",
            results.len(),
            target.username,
            self.measure.name()
        );
        results
    }

    /// Candidates sorted by score, highest first.
    ///
    /// The sort is stable, so equal scores keep catalog order.
    pub fn rank_candidates<'a>(
        &self,
        catalog: &'a Catalog,
        target_position: usize,
    ) -> Vec<SimilarityResult<'a>> {
        let mut results = self.score_candidates(catalog, target_position);
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new()
    }
}
