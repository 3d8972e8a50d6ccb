use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub response: String,
}

/// Aggregate rating of one place.
#[derive(Debug, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

/// Listing filter: `responded=true` keeps reviews the owner has answered,
/// `responded=false` keeps the ones still waiting.
#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
    pub responded: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}
