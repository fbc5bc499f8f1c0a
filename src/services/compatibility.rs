use std::collections::HashSet;

use crate::models::{
    CompatibilityBreakdown, CompatibilityFactor, CompatibilityReport, StreamingService, User,
    WatchHistoryItem,
};

/// Point budget for shared streaming services
pub const SHARED_SERVICES_MAX: u32 = 30;
/// Point budget for shared watch history
pub const SHARED_HISTORY_MAX: u32 = 30;
/// Point budget for preferred-genre overlap
pub const GENRE_MATCH_MAX: u32 = 25;
/// Point budget for binge-frequency closeness
pub const FREQUENCY_MATCH_MAX: u32 = 15;

/// Binge-frequency gap at which the frequency factor reaches zero
const FREQUENCY_TOLERANCE: u32 = 10;

/// Computes the compatibility between two users
///
/// Deterministic and side-effect free: the same pair of records always
/// yields the same report, in either argument order for the shared lists.
/// Empty collections contribute zero to their factor; no combination of
/// inputs is an error.
///
/// Each factor is a bounded ratio scaled into its point budget and rounded
/// to the nearest integer. The total is the sum of the rounded factors, so
/// the breakdown always reconciles with the total and the total stays
/// within 0..=100.
pub fn score(a: &User, b: &User) -> CompatibilityReport {
    let shared_services = shared_services(a, b);
    let shared_history = shared_watch_history(a, b);

    let services_score = scale(service_overlap(a, b), SHARED_SERVICES_MAX);
    let history_score = scale(history_overlap(a, b), SHARED_HISTORY_MAX);
    let genre_score = scale(genre_overlap(a, b), GENRE_MATCH_MAX);
    let frequency_score = scale(
        frequency_closeness(a.preferences.binge_frequency, b.preferences.binge_frequency),
        FREQUENCY_MATCH_MAX,
    );

    let breakdown = CompatibilityBreakdown {
        shared_services: services_score,
        shared_watch_history: history_score,
        genre_match: genre_score,
        frequency_match: frequency_score,
    };

    let factors = vec![
        factor("sharedServices", services_score, SHARED_SERVICES_MAX),
        factor("sharedWatchHistory", history_score, SHARED_HISTORY_MAX),
        factor("genreMatch", genre_score, GENRE_MATCH_MAX),
        factor("frequencyMatch", frequency_score, FREQUENCY_MATCH_MAX),
    ];

    CompatibilityReport {
        score: breakdown.total(),
        breakdown,
        factors,
        shared_services,
        shared_watch_history: shared_history,
    }
}

/// Streaming services present in both profiles, keyed by case-insensitive
/// name, sorted by that key so both argument orders agree
pub fn shared_services(a: &User, b: &User) -> Vec<StreamingService> {
    let b_names = service_names(b);

    let mut seen = HashSet::new();
    let mut shared: Vec<StreamingService> = a
        .streaming_services
        .iter()
        .filter(|s| b_names.contains(&s.name.to_lowercase()))
        .filter(|s| seen.insert(s.name.to_lowercase()))
        .cloned()
        .collect();
    shared.sort_by_key(|s| s.name.to_lowercase());
    shared
}

/// Watch-history items recorded by both users, keyed by content id
pub fn shared_watch_history(a: &User, b: &User) -> Vec<WatchHistoryItem> {
    let b_ids: HashSet<&str> = b.watch_history.iter().map(|w| w.content_id.as_str()).collect();

    let mut seen = HashSet::new();
    let mut shared: Vec<WatchHistoryItem> = a
        .watch_history
        .iter()
        .filter(|w| b_ids.contains(w.content_id.as_str()))
        .filter(|w| seen.insert(w.content_id.clone()))
        .cloned()
        .collect();
    shared.sort_by(|x, y| x.content_id.cmp(&y.content_id));
    shared
}

/// Jaccard similarity of the two users' service-name sets
fn service_overlap(a: &User, b: &User) -> f64 {
    jaccard(&service_names(a), &service_names(b))
}

/// Overlap coefficient of the two users' watched content-id sets
///
/// Relative to the smaller history, so a new user sharing their only watched
/// show with a heavy viewer still registers as a strong overlap.
fn history_overlap(a: &User, b: &User) -> f64 {
    let a_ids: HashSet<String> = a
        .watch_history
        .iter()
        .map(|w| w.content_id.clone())
        .collect();
    let b_ids: HashSet<String> = b
        .watch_history
        .iter()
        .map(|w| w.content_id.clone())
        .collect();

    let smaller = a_ids.len().min(b_ids.len());
    if smaller == 0 {
        return 0.0;
    }
    let intersection = a_ids.intersection(&b_ids).count();
    intersection as f64 / smaller as f64
}

/// Jaccard similarity of the case-insensitive preferred-genre sets
fn genre_overlap(a: &User, b: &User) -> f64 {
    jaccard(&genre_names(a), &genre_names(b))
}

/// Closeness of two binge-frequency counts
///
/// 1.0 for equal counts, falling off linearly to 0.0 at a gap of
/// `FREQUENCY_TOLERANCE` or more.
fn frequency_closeness(a: u32, b: u32) -> f64 {
    let gap = a.abs_diff(b);
    if gap >= FREQUENCY_TOLERANCE {
        return 0.0;
    }
    f64::from(FREQUENCY_TOLERANCE - gap) / f64::from(FREQUENCY_TOLERANCE)
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

fn service_names(user: &User) -> HashSet<String> {
    user.streaming_services
        .iter()
        .map(|s| s.name.to_lowercase())
        .collect()
}

fn genre_names(user: &User) -> HashSet<String> {
    user.preferences
        .genres
        .iter()
        .map(|g| g.to_lowercase())
        .collect()
}

fn scale(ratio: f64, max: u32) -> u32 {
    (ratio * f64::from(max)).round() as u32
}

fn factor(name: &str, score: u32, max_score: u32) -> CompatibilityFactor {
    CompatibilityFactor {
        name: name.to_string(),
        score,
        max_score,
    }
}
