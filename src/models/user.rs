use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::Swipe;

/// A registered user profile
///
/// Every collection field defaults to empty on deserialization, so partial
/// records (fresh signups, legacy rows missing fields) load without error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Streaming services the user subscribes to
    #[serde(default)]
    pub streaming_services: Vec<StreamingService>,
    /// Viewing preferences (genres, binge frequency)
    #[serde(default)]
    pub preferences: Preferences,
    /// Content the user has recorded as watched
    #[serde(default)]
    pub watch_history: Vec<WatchHistoryItem>,
    #[serde(default)]
    pub favorite_movies: Vec<FavoriteMovie>,
    /// Swipes this user has made on other users
    #[serde(default)]
    pub swipes: Vec<Swipe>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given name and no profile data yet
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            age: None,
            location: None,
            bio: None,
            streaming_services: Vec::new(),
            preferences: Preferences::default(),
            watch_history: Vec::new(),
            favorite_movies: Vec::new(),
            swipes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Returns the swipe this user has made on `target`, if any
    pub fn swipe_on(&self, target: Uuid) -> Option<&Swipe> {
        self.swipes.iter().find(|s| s.target_id == target)
    }
}

/// A streaming service subscription
///
/// The same service appears across many users; identity for matching
/// purposes is the case-insensitive name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamingService {
    pub id: String,
    /// Name of the streaming service (e.g., "Netflix", "Hulu")
    pub name: String,
}

impl StreamingService {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Viewing preferences used for matching
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    /// Preferred genre names
    ///
    /// Legacy records stored genres either as plain strings or as
    /// `{"name": ...}` objects; both forms deserialize to plain strings
    /// here so downstream code never sees the mixed representation.
    #[serde(default, deserialize_with = "genre_list")]
    pub genres: Vec<String>,
    /// How often the user binge-watches, as a self-reported count
    #[serde(default)]
    pub binge_frequency: u32,
}

/// Accepts `"Drama"` or `{"name": "Drama"}` list entries.
fn genre_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GenreEntry {
        Name(String),
        Object { name: String },
    }

    let entries = Vec::<GenreEntry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|g| match g {
            GenreEntry::Name(name) => name,
            GenreEntry::Object { name } => name,
        })
        .collect())
}

/// A single watched title in a user's history
///
/// Appended by user action and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchHistoryItem {
    /// Stable external content identifier, the intersection key when
    /// comparing two users' histories
    pub content_id: String,
    pub title: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub genre: Option<String>,
    /// Service the content was watched on, if recorded
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub episodes_watched: u32,
    pub watched_at: DateTime<Utc>,
}

/// Type of content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Movie,
    Series,
}

/// A favorite movie shown on the user's profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteMovie {
    pub content_id: String,
    pub title: String,
}
