//! Recommendation sink: the JSON document consumed by the catalog front-end.
//!
//! ```json
//! {
//!   "target": "Alice",
//!   "most_similar_user": "Bob",
//!   "similarity": 0.667,
//!   "recommendations": [ { "titre": "Dune" } ]
//! }
//! ```
//!
//! Field names are part of the interop contract and must not change.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::outcome::RecommendationSet;

/// One recommended title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTitle {
    pub titre: String,
}

/// Serialized form of a `RecommendationSet`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub target: String,
    pub most_similar_user: String,
    /// Rounded to 3 decimals
    pub similarity: f64,
    pub recommendations: Vec<RecommendedTitle>,
}

impl From<&RecommendationSet> for RecommendationReport {
    fn from(set: &RecommendationSet) -> Self {
        Self {
            target: set.target.clone(),
            most_similar_user: set.matched_user.clone(),
            similarity: round3(set.similarity),
            recommendations: set
                .titles
                .iter()
                .map(|titre| RecommendedTitle { titre: titre.clone() })
                .collect(),
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Write a report as pretty-printed JSON, creating parent directories
pub fn write_report(path: &Path, report: &RecommendationReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(
        "Wrote {} with {} recommended titles",
        path.display(),
        report.recommendations.len()
    );
    Ok(())
}

/// Read a report back (used by tools and tests)
pub fn read_report(path: &Path) -> Result<RecommendationReport> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid report in {}", path.display()))
}
