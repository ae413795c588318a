//! # Recommender
//!
//! Single-pass pipeline, one call per target:
//! 1. Resolve the target by username (first match in catalog order)
//! 2. Score every other user with the SimilarityEngine
//! 3. Select the best match (strictly greater replaces, earliest wins ties)
//! 4. Diff the best match's titles against the target's
//! 5. Emit a RecommendationOutcome
//!
//! The catalog is shared read-only, so calls never coordinate and
//! `recommend_many` simply runs them on the rayon pool.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use data_loader::Catalog;
use similarity::{SimilarityEngine, SimilarityMeasure};

use crate::outcome::{RecommendationOutcome, RecommendationSet};
use crate::selection::select_best_match;
use crate::unseen::unseen_titles;

/// Recommend titles to `target` from `catalog` using Jaccard similarity
pub fn recommend(catalog: &Catalog, target: &str) -> RecommendationOutcome {
    recommend_with(&SimilarityEngine::new(), catalog, target)
}

/// Same as [`recommend`] with a caller-provided engine
pub fn recommend_with(
    engine: &SimilarityEngine,
    catalog: &Catalog,
    target: &str,
) -> RecommendationOutcome {
    let start_time = Instant::now();

    // Resolve target
    let Some((target_position, target_user)) = catalog.find_by_username(target) else {
        debug!("Target {} not found among {} users", target, catalog.len());
        return RecommendationOutcome::TargetNotFound {
            target: target.to_string(),
        };
    };

    // Score all candidates
    let results = engine.score_candidates(catalog, target_position);

    // Pick best
    let Some(best) = select_best_match(&results) else {
        return RecommendationOutcome::NoOtherUsers {
            target: target.to_string(),
        };
    };
    debug!(
        "Best match for {} is {} (position {}, similarity {:.3})",
        target, best.user.username, best.position, best.score
    );

    // Diff title sets
    let titles = unseen_titles(&target_user.rated_titles, &best.user.rated_titles);

    let set = RecommendationSet {
        target: target.to_string(),
        matched_user: best.user.username.clone(),
        similarity: best.score,
        titles,
    };

    debug!(
        "Recommendation for {} computed in {:.2?}",
        target,
        start_time.elapsed()
    );

    if set.is_empty() {
        RecommendationOutcome::NothingNew(set)
    } else {
        RecommendationOutcome::Recommended(set)
    }
}

/// Recommender bound to one catalog snapshot
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    engine: SimilarityEngine,
}

impl Recommender {
    /// Create a recommender using Jaccard similarity
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            engine: SimilarityEngine::new(),
        }
    }

    /// Use another similarity measure (selection and diff rules stay the same)
    pub fn with_measure(mut self, measure: impl SimilarityMeasure + 'static) -> Self {
        self.engine = self.engine.with_measure(measure);
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    /// Main entry point: recommendations for one target username
    #[instrument(skip(self))]
    pub fn recommend(&self, target: &str) -> RecommendationOutcome {
        let outcome = recommend_with(&self.engine, &self.catalog, target);
        info!("{}", outcome);
        outcome
    }

    /// Run independent recommendations in parallel.
    ///
    /// Outcomes are returned in the order of `targets`.
    pub fn recommend_many<S>(&self, targets: &[S]) -> Vec<RecommendationOutcome>
    where
        S: AsRef<str> + Sync,
    {
        let start_time = Instant::now();

        let outcomes: Vec<RecommendationOutcome> = targets
            .par_iter()
            .map(|target| recommend_with(&self.engine, &self.catalog, target.as_ref()))
            .collect();

        info!(
            "Computed {} recommendations in {:.2?}",
            outcomes.len(),
            start_time.elapsed()
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{RatedTitles, User};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn scenario_catalog() -> Catalog {
        [
            User::new(1, "Alice").with_titles(["Matrix", "Inception"]),
            User::new(2, "Bob").with_titles(["Matrix", "Inception", "Dune"]),
            User::new(3, "Carol").with_titles(["Dune"]),
        ]
        .into_iter()
        .collect()
    }

    fn expect_set(outcome: &RecommendationOutcome) -> &RecommendationSet {
        outcome
            .recommendation_set()
            .unwrap_or_else(|| panic!("expected a best match, got {:?}", outcome))
    }

    // ============================================================================
    // Outcomes
    // ============================================================================

    #[test]
    fn test_best_match_and_unseen_titles() {
        let catalog = scenario_catalog();
        let outcome = recommend(&catalog, "Alice");

        assert!(matches!(outcome, RecommendationOutcome::Recommended(_)));
        let set = expect_set(&outcome);
        assert_eq!(set.matched_user, "Bob");
        assert!((set.similarity - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(set.titles, vec!["Dune"]);
    }

    #[test]
    fn test_identical_sets_give_nothing_new() {
        let catalog: Catalog = [
            User::new(1, "Alice").with_titles(["Matrix", "Dune"]),
            User::new(2, "Bob").with_titles(["Dune", "Matrix"]),
        ]
        .into_iter()
        .collect();

        let outcome = recommend(&catalog, "Alice");
        assert!(matches!(outcome, RecommendationOutcome::NothingNew(_)));
        let set = expect_set(&outcome);
        assert_eq!(set.similarity, 1.0);
        assert!(set.titles.is_empty());
    }

    #[test]
    fn test_target_not_found() {
        let outcome = recommend(&scenario_catalog(), "Zoe");
        assert_eq!(
            outcome,
            RecommendationOutcome::TargetNotFound { target: "Zoe".to_string() }
        );
    }

    #[test]
    fn test_no_other_users() {
        let catalog: Catalog = [User::new(1, "Alice").with_titles(["Matrix"])]
            .into_iter()
            .collect();
        let outcome = recommend(&catalog, "Alice");
        assert_eq!(
            outcome,
            RecommendationOutcome::NoOtherUsers { target: "Alice".to_string() }
        );
    }

    #[test]
    fn test_zero_similarity_still_matches_first_candidate() {
        let catalog: Catalog = [
            User::new(1, "Alice").with_titles(["Matrix"]),
            User::new(2, "Bob").with_titles(["Dune"]),
            User::new(3, "Carol").with_titles(["Alien"]),
        ]
        .into_iter()
        .collect();

        let outcome = recommend(&catalog, "Alice");
        let set = expect_set(&outcome);
        assert_eq!(set.matched_user, "Bob");
        assert_eq!(set.similarity, 0.0);
        assert_eq!(set.titles, vec!["Dune"]);
    }

    #[test]
    fn test_duplicate_target_name_uses_first_entry() {
        let catalog: Catalog = [
            User::new(1, "Alice").with_titles(["Matrix"]),
            User::new(2, "Bob").with_titles(["Matrix", "Dune"]),
            User::new(3, "Alice").with_titles(["Matrix", "Dune"]),
        ]
        .into_iter()
        .collect();

        // The second Alice is a candidate like any other user, and ties Bob at
        // 0.5; Bob comes first in catalog order.
        let outcome = recommend(&catalog, "Alice");
        assert_eq!(expect_set(&outcome).matched_user, "Bob");
    }

    // ============================================================================
    // Recommender
    // ============================================================================

    struct Overlap;

    impl SimilarityMeasure for Overlap {
        fn name(&self) -> &str {
            "overlap"
        }

        fn similarity(&self, a: &RatedTitles, b: &RatedTitles) -> f64 {
            a.iter().filter(|t| b.contains(t)).count() as f64
        }
    }

    #[test]
    fn test_recommender_with_measure() {
        let catalog: Catalog = [
            User::new(1, "Alice").with_titles(["A", "B"]),
            User::new(2, "Small").with_titles(["A"]),
            User::new(3, "Large").with_titles(["A", "B", "C", "D", "E", "F"]),
        ]
        .into_iter()
        .collect();
        let catalog = Arc::new(catalog);

        // Jaccard prefers the small profile (1/2 vs 2/6)
        let jaccard = Recommender::new(catalog.clone());
        assert_eq!(expect_set(&jaccard.recommend("Alice")).matched_user, "Small");

        // Raw overlap prefers the large one (1 vs 2)
        let overlap = Recommender::new(catalog).with_measure(Overlap);
        assert_eq!(overlap.engine().measure_name(), "overlap");
        let outcome = overlap.recommend("Alice");
        let set = expect_set(&outcome);
        assert_eq!(set.matched_user, "Large");
        assert_eq!(set.titles, vec!["C", "D", "E", "F"]);
    }

    #[test]
    fn test_recommend_many_keeps_input_order() {
        let recommender = Recommender::new(Arc::new(scenario_catalog()));
        let targets = ["Carol", "Zoe", "Alice", "Bob"];

        let outcomes = recommender.recommend_many(&targets);
        let names: Vec<&str> = outcomes.iter().map(|o| o.target()).collect();
        assert_eq!(names, targets);

        assert!(matches!(outcomes[1], RecommendationOutcome::TargetNotFound { .. }));
        assert_eq!(outcomes[2], recommender.recommend("Alice"));
    }
}
