//! Best-match selection over scored candidates.
//!
//! Policy: candidates are scanned in catalog order and a candidate replaces
//! the current best only when its score is strictly greater. The first
//! candidate scanned is the initial best, so ties (0.0 included) go to the
//! earliest candidate. A NaN score ranks below every number, so it never
//! shadows a real score.

use similarity::SimilarityResult;

/// Pick the best match, or `None` when there are no candidates
pub fn select_best_match<'a>(results: &[SimilarityResult<'a>]) -> Option<SimilarityResult<'a>> {
    let mut best: Option<SimilarityResult<'a>> = None;
    for result in results {
        if best.is_none_or(|current| outranks(result.score, current.score)) {
            best = Some(*result);
        }
    }
    best
}

fn outranks(score: f64, current: f64) -> bool {
    score > current || (current.is_nan() && !score.is_nan())
}
