use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a swipe on another user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Like,
    Dislike,
}

/// A recorded swipe on another user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Swipe {
    /// The user being swiped on
    pub target_id: Uuid,
    pub direction: SwipeDirection,
    pub swiped_at: DateTime<Utc>,
}

impl Swipe {
    pub fn new(target_id: Uuid, direction: SwipeDirection) -> Self {
        Self {
            target_id,
            direction,
            swiped_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        assert_eq!(
            serde_json::to_string(&SwipeDirection::Like).unwrap(),
            "\"like\""
        );
        assert_eq!(
            serde_json::to_string(&SwipeDirection::Dislike).unwrap(),
            "\"dislike\""
        );
    }

    #[test]
    fn test_swipe_roundtrip() {
        let swipe = Swipe::new(Uuid::new_v4(), SwipeDirection::Like);
        let json = serde_json::to_string(&swipe).unwrap();
        let back: Swipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, swipe);
    }
}
