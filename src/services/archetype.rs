use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Binge frequency at or above which a user is a serial binger
const BINGER_THRESHOLD: u32 = 7;
/// Distinct preferred genres at or above which a user is a genre explorer
const EXPLORER_THRESHOLD: usize = 5;
/// Watch-history entries at or above which a user is a devoted fan
const DEVOTED_THRESHOLD: usize = 20;

/// Viewer archetype shown on a user's profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// High binge frequency
    SerialBinger,
    /// Wide spread of preferred genres
    GenreExplorer,
    /// Deep watch history
    DevotedFan,
    /// Everyone else
    CasualViewer,
}

/// Classifies a user into a viewer archetype
///
/// Checks run in priority order: binge frequency, then genre spread, then
/// history depth. Every profile classifies to something.
pub fn classify(user: &User) -> Archetype {
    if user.preferences.binge_frequency >= BINGER_THRESHOLD {
        return Archetype::SerialBinger;
    }

    let distinct_genres: HashSet<String> = user
        .preferences
        .genres
        .iter()
        .map(|g| g.to_lowercase())
        .collect();
    if distinct_genres.len() >= EXPLORER_THRESHOLD {
        return Archetype::GenreExplorer;
    }

    if user.watch_history.len() >= DEVOTED_THRESHOLD {
        return Archetype::DevotedFan;
    }

    Archetype::CasualViewer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, Preferences, WatchHistoryItem};
    use chrono::Utc;

    fn history_item(n: usize) -> WatchHistoryItem {
        WatchHistoryItem {
            content_id: format!("content-{}", n),
            title: format!("Show {}", n),
            content_type: ContentType::Series,
            genre: None,
            service: None,
            episodes_watched: 1,
            watched_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_profile_is_casual_viewer() {
        let user = User::new("Sam".to_string());
        assert_eq!(classify(&user), Archetype::CasualViewer);
    }

    #[test]
    fn test_high_binge_frequency_wins() {
        let mut user = User::new("Sam".to_string());
        user.preferences = Preferences {
            // Would also qualify as an explorer; binge check runs first
            genres: vec!["a", "b", "c", "d", "e"]
                .into_iter()
                .map(String::from)
                .collect(),
            binge_frequency: BINGER_THRESHOLD,
        };
        assert_eq!(classify(&user), Archetype::SerialBinger);
    }

    #[test]
    fn test_wide_genre_spread() {
        let mut user = User::new("Sam".to_string());
        user.preferences.genres = vec!["Sci-Fi", "Drama", "Horror", "Action", "Comedy"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(classify(&user), Archetype::GenreExplorer);
    }

    #[test]
    fn test_duplicate_genres_do_not_qualify() {
        let mut user = User::new("Sam".to_string());
        user.preferences.genres = vec!["Sci-Fi", "sci-fi", "SCI-FI", "Drama", "drama"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(classify(&user), Archetype::CasualViewer);
    }

    #[test]
    fn test_deep_history() {
        let mut user = User::new("Sam".to_string());
        user.watch_history = (0..DEVOTED_THRESHOLD).map(history_item).collect();
        assert_eq!(classify(&user), Archetype::DevotedFan);
    }

    #[test]
    fn test_archetype_serialization() {
        assert_eq!(
            serde_json::to_string(&Archetype::SerialBinger).unwrap(),
            "\"serial_binger\""
        );
        assert_eq!(
            serde_json::to_string(&Archetype::CasualViewer).unwrap(),
            "\"casual_viewer\""
        );
    }
}
