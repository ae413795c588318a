//! Jaccard similarity between rated-title sets.
//!
//! `|A ∩ B| / |A ∪ B|`, with `|A ∪ B| = |A| + |B| - |A ∩ B|`.
//! Two empty sets have no union; their similarity is defined as `0.0`.

use data_loader::RatedTitles;
use std::collections::HashSet;
use std::hash::Hash;

/// A pairwise similarity between two users' rated titles, in `[0.0, 1.0]`
pub trait SimilarityMeasure: Send + Sync {
    /// Name of the measure (for logging/debugging)
    fn name(&self) -> &str;

    /// Should return a finite score; best-match selection ranks NaN below
    /// every number.
    fn similarity(&self, a: &RatedTitles, b: &RatedTitles) -> f64;
}

/// Jaccard similarity measure
#[derive(Debug, Clone, Copy, Default)]
pub struct Jaccard;

impl SimilarityMeasure for Jaccard {
    fn name(&self) -> &str {
        "jaccard"
    }

    fn similarity(&self, a: &RatedTitles, b: &RatedTitles) -> f64 {
        jaccard(a.as_set(), b.as_set())
    }
}

/// Jaccard similarity of two sets.
///
/// Elements compare with `Eq`, so string titles match exactly.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    // Probe the larger set with the smaller one
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|item| large.contains(*item)).count();

    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identical() {
        let a = set(&["Matrix", "Inception", "Dune"]);
        assert!((jaccard(&a, &a) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_both_empty_is_zero() {
        let a = set(&[]);
        let sim = jaccard(&a, &a);
        assert_eq!(sim, 0.0);
        assert!(!sim.is_nan());
    }

    #[test]
    fn test_one_empty() {
        assert_eq!(jaccard(&set(&[]), &set(&["Dune"])), 0.0);
    }

    #[test]
    fn test_no_overlap() {
        let a = set(&["Matrix", "Inception"]);
        let b = set(&["Dune", "Alien"]);
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let a = set(&["Matrix", "Inception"]);
        let b = set(&["Matrix", "Inception", "Dune"]);
        // Intersection = 2, Union = 3
        assert!((jaccard(&a, &b) - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (set(&["A", "B", "C"]), set(&["B", "C", "D", "E"])),
            (set(&["A"]), set(&[])),
            (set(&["x", "y"]), set(&["y"])),
        ];
        for (a, b) in &pairs {
            assert_eq!(jaccard(a, b), jaccard(b, a));
        }
    }

    #[test]
    fn test_range() {
        let sets = [set(&[]), set(&["A"]), set(&["A", "B"]), set(&["B", "C", "D"])];
        for a in &sets {
            for b in &sets {
                let sim = jaccard(a, b);
                assert!((0.0..=1.0).contains(&sim), "out of range: {}", sim);
            }
        }
    }

    #[test]
    fn test_exact_string_equality() {
        let a = set(&["Dune"]);
        let b = set(&["dune", "Dune "]);
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn test_measure_on_rated_titles() {
        let a: RatedTitles = ["Matrix", "Dune"].into_iter().collect();
        let b: RatedTitles = ["Dune", "Alien"].into_iter().collect();
        // Intersection = {Dune}, Union = {Matrix, Dune, Alien}
        assert!((Jaccard.similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-10);
        assert_eq!(Jaccard.name(), "jaccard");
    }
}
