//! Unseen titles: what the best match rated and the target did not.
//!
//! Uses the target's title set for O(1) lookups and keeps the best match's
//! rating order.

use data_loader::RatedTitles;

/// Titles of `matched` absent from `target`, in `matched` order
pub fn unseen_titles(target: &RatedTitles, matched: &RatedTitles) -> Vec<String> {
    matched
        .iter()
        .filter(|title| !target.contains(title))
        .map(str::to_string)
        .collect()
}
