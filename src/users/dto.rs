use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile update: exactly the three fields a user may change.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub username: String,
    pub locality: String,
}

/// Result of toggling a bookmark.
#[derive(Debug, Serialize)]
pub struct FavoriteToggle {
    pub place_id: Uuid,
    pub favorite: bool,
}
