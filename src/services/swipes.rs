use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Swipe, SwipeDirection, User},
    store::UserStore,
};

/// Per-user swipe quota
///
/// Passed in explicitly from configuration; nothing about the quota lives
/// in process-wide state.
#[derive(Debug, Clone, Copy)]
pub struct SwipeLimits {
    /// Maximum swipes per UTC day
    pub daily: u32,
}

/// Result of recording a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOutcome {
    /// True when a like meets an existing like from the target
    pub mutual_match: bool,
    /// Swipes the user has left today
    pub remaining_today: u32,
}

/// Records a swipe from one user on another
///
/// Both users must exist and be distinct. Swipes on a new target count
/// against the daily quota; re-swiping an already-swiped target only
/// updates the stored direction. A like is reported as a mutual match when
/// the target already likes the swiper.
pub async fn record_swipe(
    store: &dyn UserStore,
    limits: SwipeLimits,
    swiper_id: Uuid,
    target_id: Uuid,
    direction: SwipeDirection,
) -> AppResult<SwipeOutcome> {
    if swiper_id == target_id {
        return Err(AppError::InvalidInput(
            "Cannot swipe on yourself".to_string(),
        ));
    }

    let mut swiper = store
        .get_user(swiper_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", swiper_id)))?;
    let target = store
        .get_user(target_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", target_id)))?;

    let used_today = swipes_today(&swiper);
    let is_reswipe = swiper.swipe_on(target_id).is_some();

    if !is_reswipe && used_today >= limits.daily {
        tracing::warn!(
            swiper_id = %swiper_id,
            used_today,
            limit = limits.daily,
            "Daily swipe limit reached"
        );
        return Err(AppError::RateLimited(format!(
            "Daily swipe limit of {} reached",
            limits.daily
        )));
    }

    match swiper.swipes.iter_mut().find(|s| s.target_id == target_id) {
        Some(existing) => {
            existing.direction = direction;
            existing.swiped_at = Utc::now();
        }
        None => swiper.swipes.push(Swipe::new(target_id, direction)),
    }

    let mutual_match = direction == SwipeDirection::Like
        && matches!(
            target.swipe_on(swiper_id),
            Some(back) if back.direction == SwipeDirection::Like
        );

    store.update_user(swiper).await?;

    if mutual_match {
        tracing::info!(
            swiper_id = %swiper_id,
            target_id = %target_id,
            "Mutual match"
        );
    }

    let used_now = if is_reswipe { used_today } else { used_today + 1 };
    Ok(SwipeOutcome {
        mutual_match,
        remaining_today: limits.daily.saturating_sub(used_now),
    })
}

/// Counts swipes made during the current UTC day
fn swipes_today(user: &User) -> u32 {
    let today = Utc::now().date_naive();
    user.swipes
        .iter()
        .filter(|s| s.swiped_at.date_naive() == today)
        .count() as u32
}
