use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{ContentType, FavoriteMovie, Preferences, StreamingService, User, WatchHistoryItem},
    services::archetype::{self, Archetype},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub streaming_services: Vec<StreamingService>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub watch_history: Vec<WatchHistoryItem>,
    #[serde(default)]
    pub favorite_movies: Vec<FavoriteMovie>,
}

/// Profile edit; omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub streaming_services: Option<Vec<StreamingService>>,
    pub preferences: Option<Preferences>,
    pub favorite_movies: Option<Vec<FavoriteMovie>>,
}

#[derive(Debug, Deserialize)]
pub struct AddWatchHistoryRequest {
    pub content_id: String,
    pub title: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub episodes_watched: u32,
    /// Defaults to now when the client does not say when it was watched
    #[serde(default)]
    pub watched_at: Option<DateTime<Utc>>,
}

/// Public view of a user; swipe history stays private
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub age: Option<u8>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub streaming_services: Vec<StreamingService>,
    pub preferences: Preferences,
    pub watch_history: Vec<WatchHistoryItem>,
    pub favorite_movies: Vec<FavoriteMovie>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            age: user.age,
            location: user.location.clone(),
            bio: user.bio.clone(),
            streaming_services: user.streaming_services.clone(),
            preferences: user.preferences.clone(),
            watch_history: user.watch_history.clone(),
            favorite_movies: user.favorite_movies.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArchetypeResponse {
    pub user_id: Uuid,
    pub archetype: Archetype,
}

// Handlers

/// Create a new user profile
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Name cannot be empty".to_string()));
    }

    let mut user = User::new(request.name);
    user.age = request.age;
    user.location = request.location;
    user.bio = request.bio;
    user.streaming_services = request.streaming_services;
    user.preferences = request.preferences;
    user.watch_history = request.watch_history;
    user.favorite_movies = request.favorite_movies;

    let response = UserResponse::from(&user);
    state.store.insert_user(user).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Fetch a single user
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = fetch_user(&state, id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Edit a user profile
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let mut user = fetch_user(&state, id).await?;

    if let Some(name) = request.name {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput("Name cannot be empty".to_string()));
        }
        user.name = name;
    }
    if let Some(age) = request.age {
        user.age = Some(age);
    }
    if let Some(location) = request.location {
        user.location = Some(location);
    }
    if let Some(bio) = request.bio {
        user.bio = Some(bio);
    }
    if let Some(services) = request.streaming_services {
        user.streaming_services = services;
    }
    if let Some(preferences) = request.preferences {
        user.preferences = preferences;
    }
    if let Some(favorites) = request.favorite_movies {
        user.favorite_movies = favorites;
    }

    let response = UserResponse::from(&user);
    state.store.update_user(user).await?;

    Ok(Json(response))
}

/// Append a watch-history entry
pub async fn add_watch_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddWatchHistoryRequest>,
) -> AppResult<(StatusCode, Json<WatchHistoryItem>)> {
    let mut user = fetch_user(&state, id).await?;

    let item = WatchHistoryItem {
        content_id: request.content_id,
        title: request.title,
        content_type: request.content_type,
        genre: request.genre,
        service: request.service,
        episodes_watched: request.episodes_watched,
        watched_at: request.watched_at.unwrap_or_else(Utc::now),
    };

    user.watch_history.push(item.clone());
    state.store.update_user(user).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Viewer archetype for a user
pub async fn archetype(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ArchetypeResponse>> {
    let user = fetch_user(&state, id).await?;
    Ok(Json(ArchetypeResponse {
        user_id: user.id,
        archetype: archetype::classify(&user),
    }))
}

async fn fetch_user(state: &AppState, id: Uuid) -> AppResult<User> {
    state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", id)))
}
