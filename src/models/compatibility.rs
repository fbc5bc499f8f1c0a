use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{StreamingService, WatchHistoryItem};

/// Per-factor point totals for a scored pair
///
/// Field values are already rounded; they sum exactly to the total score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityBreakdown {
    pub shared_services: u32,
    pub shared_watch_history: u32,
    pub genre_match: u32,
    pub frequency_match: u32,
}

impl CompatibilityBreakdown {
    /// Sum of all factor scores
    pub fn total(&self) -> u32 {
        self.shared_services + self.shared_watch_history + self.genre_match + self.frequency_match
    }
}

/// One entry in the ordered factor list returned alongside a score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityFactor {
    pub name: String,
    pub score: u32,
    pub max_score: u32,
}

/// Full result of scoring one pair of users
///
/// Transient: computed per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompatibilityReport {
    pub score: u32,
    pub breakdown: CompatibilityBreakdown,
    pub factors: Vec<CompatibilityFactor>,
    /// Subscriptions present in both users' profiles
    pub shared_services: Vec<StreamingService>,
    /// Content items both users have recorded as watched
    pub shared_watch_history: Vec<WatchHistoryItem>,
}

/// A candidate user annotated with compatibility data, as returned by
/// match discovery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub user_id: Uuid,
    pub name: String,
    pub compatibility_score: u32,
    pub shared_services: Vec<StreamingService>,
    pub shared_watch_history: Vec<WatchHistoryItem>,
    pub compatibility_breakdown: CompatibilityBreakdown,
    pub compatibility_factors: Vec<CompatibilityFactor>,
}
