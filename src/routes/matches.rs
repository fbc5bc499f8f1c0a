use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::MatchResult,
    services::matching,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    /// Minimum compatibility score a candidate must reach
    #[serde(default, alias = "minScore")]
    pub min_score: u32,
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchResult>,
}

/// Handler for match discovery
pub async fn find(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<MatchQuery>,
) -> AppResult<Json<MatchesResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        min_score = params.min_score,
        "Processing match search"
    );

    let matches = matching::find_matches(state.store.as_ref(), user_id, params.min_score).await?;

    Ok(Json(MatchesResponse { matches }))
}
