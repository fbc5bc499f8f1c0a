use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id,
    services::swipes::SwipeLimits,
    store::UserStore,
};

pub mod matches;
pub mod swipes;
pub mod users;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub limits: SwipeLimits,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, limits: SwipeLimits) -> Self {
        Self { store, limits }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(request_id::request_span))
        .layer(from_fn(request_id::propagate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create).get(users::list))
        .route("/users/:id", get(users::get_one).put(users::update))
        .route("/users/:id/watch-history", post(users::add_watch_history))
        .route("/users/:id/archetype", get(users::archetype))
        .route("/matches/find/:id", get(matches::find))
        .route("/swipes", post(swipes::swipe))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
