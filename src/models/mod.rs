mod compatibility;
mod swipe;
mod user;

pub use compatibility::{
    CompatibilityBreakdown, CompatibilityFactor, CompatibilityReport, MatchResult,
};
pub use swipe::{Swipe, SwipeDirection};
pub use user::{ContentType, FavoriteMovie, Preferences, StreamingService, User, WatchHistoryItem};
