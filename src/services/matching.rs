use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{MatchResult, User},
    services::compatibility,
    store::UserStore,
};

/// Finds compatible candidates for a user
///
/// Every stored user is considered except the requester themself and anyone
/// the requester has already swiped on in either direction; the feed does
/// not resurface people the user has already accepted or rejected.
/// Candidates scoring at least `min_score` are returned ordered by
/// descending compatibility; ties keep the store's listing order.
///
/// Read-only: concurrent searches need no coordination.
pub async fn find_matches(
    store: &dyn UserStore,
    requester_id: Uuid,
    min_score: u32,
) -> AppResult<Vec<MatchResult>> {
    let requester = store
        .get_user(requester_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", requester_id)))?;

    let candidates = store.list_users().await?;
    let considered = candidates.len();

    let mut matches: Vec<MatchResult> = candidates
        .iter()
        .filter(|candidate| candidate.id != requester_id)
        .filter(|candidate| requester.swipe_on(candidate.id).is_none())
        .map(|candidate| annotate(&requester, candidate))
        .filter(|result| result.compatibility_score >= min_score)
        .collect();

    // Stable sort keeps insertion order among equal scores
    matches.sort_by(|x, y| y.compatibility_score.cmp(&x.compatibility_score));

    tracing::info!(
        requester_id = %requester_id,
        considered,
        matched = matches.len(),
        min_score,
        "Match search completed"
    );

    Ok(matches)
}

/// Scores one candidate against the requester
fn annotate(requester: &User, candidate: &User) -> MatchResult {
    let report = compatibility::score(requester, candidate);

    MatchResult {
        user_id: candidate.id,
        name: candidate.name.clone(),
        compatibility_score: report.score,
        shared_services: report.shared_services,
        shared_watch_history: report.shared_watch_history,
        compatibility_breakdown: report.breakdown,
        compatibility_factors: report.factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContentType, Preferences, StreamingService, Swipe, SwipeDirection, WatchHistoryItem,
    };
    use crate::store::{MemoryStore, MockUserStore, StoreError};
    use chrono::Utc;

    fn user_with_services(name: &str, services: &[&str], binge_frequency: u32) -> User {
        let mut user = User::new(name.to_string());
        user.streaming_services = services
            .iter()
            .map(|s| StreamingService::new(s.to_lowercase(), *s))
            .collect();
        user.preferences = Preferences {
            genres: vec![],
            binge_frequency,
        };
        user
    }

    #[tokio::test]
    async fn test_unknown_requester_is_not_found() {
        let store = MemoryStore::new();
        let result = find_matches(&store, Uuid::new_v4(), 0).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_data_access_error() {
        let mut store = MockUserStore::new();
        store
            .expect_get_user()
            .returning(|id| Err(StoreError::Seed(format!("read failed for {}", id))));

        let result = find_matches(&store, Uuid::new_v4(), 0).await;
        assert!(matches!(result, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn test_requester_never_matches_themself() {
        // Identical profile would score 100 if it were considered
        let requester = user_with_services("Sam", &["Netflix"], 5);
        let store = MemoryStore::from_users(vec![requester.clone()]);

        let matches = find_matches(&store, requester.id, 0).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_matches_sorted_by_descending_score() {
        let requester = user_with_services("Sam", &["Netflix", "Hulu"], 5);
        // Far binge counts keep the frequency factor from leveling scores
        let weak = user_with_services("Weak", &["Prime"], 40);
        let strong = user_with_services("Strong", &["Netflix", "Hulu"], 5);
        let middle = user_with_services("Middle", &["Netflix"], 40);

        let store = MemoryStore::from_users(vec![
            requester.clone(),
            weak.clone(),
            strong.clone(),
            middle.clone(),
        ]);

        let matches = find_matches(&store, requester.id, 0).await.unwrap();
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Strong", "Middle", "Weak"]);

        let scores: Vec<u32> = matches.iter().map(|m| m.compatibility_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let requester = user_with_services("Sam", &["Netflix"], 5);
        let first = user_with_services("First", &["Netflix"], 5);
        let second = user_with_services("Second", &["Netflix"], 5);

        let store =
            MemoryStore::from_users(vec![requester.clone(), first.clone(), second.clone()]);

        let matches = find_matches(&store, requester.id, 0).await.unwrap();
        assert_eq!(matches[0].user_id, first.id);
        assert_eq!(matches[1].user_id, second.id);
    }

    /// Full profile scoring the maximum against an identical copy
    fn full_profile(name: &str) -> User {
        let mut user = user_with_services(name, &["Netflix", "Hulu"], 5);
        user.preferences.genres = vec!["Sci-Fi".to_string(), "Drama".to_string()];
        user.watch_history = vec![WatchHistoryItem {
            content_id: "stranger-things".to_string(),
            title: "Stranger Things".to_string(),
            content_type: ContentType::Series,
            genre: None,
            service: None,
            episodes_watched: 8,
            watched_at: Utc::now(),
        }];
        user
    }

    #[tokio::test]
    async fn test_min_score_filters_candidates() {
        let requester = full_profile("Sam");
        let perfect = full_profile("Perfect");
        let partial = user_with_services("Partial", &["Netflix"], 5);

        let store =
            MemoryStore::from_users(vec![requester.clone(), perfect.clone(), partial.clone()]);

        let all = find_matches(&store, requester.id, 0).await.unwrap();
        assert_eq!(all.len(), 2);

        let only_perfect = find_matches(&store, requester.id, 100).await.unwrap();
        assert_eq!(only_perfect.len(), 1);
        assert_eq!(only_perfect[0].user_id, perfect.id);
        assert_eq!(only_perfect[0].compatibility_score, 100);
    }

    #[tokio::test]
    async fn test_min_score_100_can_return_empty() {
        let requester = user_with_services("Sam", &["Netflix"], 5);
        let partial = user_with_services("Partial", &["Hulu"], 5);

        let store = MemoryStore::from_users(vec![requester.clone(), partial]);

        let matches = find_matches(&store, requester.id, 100).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_already_swiped_users_excluded() {
        let mut requester = user_with_services("Sam", &["Netflix"], 5);
        let liked = user_with_services("Liked", &["Netflix"], 5);
        let disliked = user_with_services("Disliked", &["Netflix"], 5);
        let fresh = user_with_services("Fresh", &["Netflix"], 5);

        requester.swipes = vec![
            Swipe::new(liked.id, SwipeDirection::Like),
            Swipe::new(disliked.id, SwipeDirection::Dislike),
        ];

        let store = MemoryStore::from_users(vec![
            requester.clone(),
            liked,
            disliked,
            fresh.clone(),
        ]);

        let matches = find_matches(&store, requester.id, 0).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].user_id, fresh.id);
    }

    #[tokio::test]
    async fn test_results_carry_breakdown_and_shared_items() {
        let requester = user_with_services("Sam", &["Netflix", "Hulu"], 5);
        let candidate = user_with_services("Cleo", &["Netflix"], 5);

        let store = MemoryStore::from_users(vec![requester.clone(), candidate]);

        let matches = find_matches(&store, requester.id, 0).await.unwrap();
        let found = &matches[0];

        assert_eq!(
            found.compatibility_breakdown.total(),
            found.compatibility_score
        );
        assert_eq!(found.compatibility_factors.len(), 4);
        assert_eq!(found.shared_services.len(), 1);
        assert_eq!(found.shared_services[0].name, "Netflix");
    }
}
