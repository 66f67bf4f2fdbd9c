use serde::Serialize;
use std::fmt;

use crate::data_models::SearchResult;

/// Where the target business landed in a result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankOutcome {
    /// `position` is 1-based.
    Found { business: String, position: usize },
    NotFound { business: String, total: usize },
}

impl RankOutcome {
    pub fn position(&self) -> Option<usize> {
        match self {
            RankOutcome::Found { position, .. } => Some(*position),
            RankOutcome::NotFound { .. } => None,
        }
    }
}

impl fmt::Display for RankOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankOutcome::Found { business, position } => {
                write!(f, "'{business}' is ranked #{position}")
            }
            RankOutcome::NotFound { business, total } => {
                write!(f, "'{business}' is not found in top {total}")
            }
        }
    }
}

/// Scan `results` in order for the first name containing `business`,
/// case-insensitively. Returns `None` when `business` is blank.
pub fn derive_rank(results: &[SearchResult], business: &str) -> Option<RankOutcome> {
    if business.trim().is_empty() {
        return None;
    }

    let needle = business.to_lowercase();
    let outcome = match results
        .iter()
        .position(|r| r.name.to_lowercase().contains(&needle))
    {
        Some(idx) => RankOutcome::Found {
            business: business.to_string(),
            position: idx + 1,
        },
        None => RankOutcome::NotFound {
            business: business.to_string(),
            total: results.len(),
        },
    };
    Some(outcome)
}
