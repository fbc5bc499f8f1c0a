use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppResult, models::SwipeDirection, services::swipes};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub swiper_id: Uuid,
    pub target_id: Uuid,
    pub direction: SwipeDirection,
}

#[derive(Debug, Serialize)]
pub struct SwipeResponse {
    pub mutual_match: bool,
    pub remaining_today: u32,
}

/// Record a swipe on another user
pub async fn swipe(
    State(state): State<AppState>,
    Json(request): Json<SwipeRequest>,
) -> AppResult<(StatusCode, Json<SwipeResponse>)> {
    let outcome = swipes::record_swipe(
        state.store.as_ref(),
        state.limits,
        request.swiper_id,
        request.target_id,
        request.direction,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SwipeResponse {
            mutual_match: outcome.mutual_match,
            remaining_today: outcome.remaining_today,
        }),
    ))
}
