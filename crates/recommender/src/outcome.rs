//! Result types of a recommendation run.

use std::fmt;

/// Titles recommended to a target from its most similar user
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSet {
    pub target: String,
    pub matched_user: String,
    /// Similarity between target and matched user, in `[0.0, 1.0]`
    pub similarity: f64,
    /// Unseen titles in the matched user's rating order
    pub titles: Vec<String>,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Every way a recommendation run can end.
///
/// None of these are errors: they describe the input data, and the caller
/// decides how to present each one.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    /// A best match was found and it rated titles the target has not
    Recommended(RecommendationSet),
    /// A best match was found but every title it rated is already rated by the target
    NothingNew(RecommendationSet),
    /// No catalog user has the target username
    TargetNotFound { target: String },
    /// The target is the only user of the catalog
    NoOtherUsers { target: String },
}

impl RecommendationOutcome {
    /// The recommendation set, for outcomes that found a best match
    pub fn recommendation_set(&self) -> Option<&RecommendationSet> {
        match self {
            Self::Recommended(set) | Self::NothingNew(set) => Some(set),
            Self::TargetNotFound { .. } | Self::NoOtherUsers { .. } => None,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Recommended(set) | Self::NothingNew(set) => &set.target,
            Self::TargetNotFound { target } | Self::NoOtherUsers { target } => target,
        }
    }

    /// Short, stable name of the outcome (for logs and summaries)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recommended(_) => "recommended",
            Self::NothingNew(_) => "nothing_new",
            Self::TargetNotFound { .. } => "target_not_found",
            Self::NoOtherUsers { .. } => "no_other_users",
        }
    }
}

impl fmt::Display for RecommendationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recommended(set) => write!(
                f,
                "{} is most similar to {} (similarity {:.3}), {} titles to recommend",
                set.target,
                set.matched_user,
                set.similarity,
                set.titles.len()
            ),
            Self::NothingNew(set) => write!(
                f,
                "{} is most similar to {} (similarity {:.3}), but has already rated all of their titles",
                set.target, set.matched_user, set.similarity
            ),
            Self::TargetNotFound { target } => write!(f, "User {} not found in the catalog", target),
            Self::NoOtherUsers { target } => {
                write!(f, "No other users to compare {} with", target)
            }
        }
    }
}
