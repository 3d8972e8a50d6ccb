use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::watch;
use uuid::Uuid;

use crate::events::{EventBus, Notification};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub place_id: Uuid,
    /// 1 to 5 stars; range is enforced at the request boundary.
    pub rating: u8,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub owner_response: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub place_id: Uuid,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("review not found")]
    UnknownReview,
}

/// Authoritative list of reviews, watch-backed like the other stores.
pub struct ReviewStore {
    state: watch::Sender<Arc<Vec<Review>>>,
    events: EventBus,
}

impl ReviewStore {
    pub fn new(events: EventBus) -> Self {
        let (state, _) = watch::channel(Arc::new(Vec::new()));
        Self { state, events }
    }

    pub fn snapshot(&self) -> Arc<Vec<Review>> {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<Arc<Vec<Review>>> {
        self.state.subscribe()
    }

    pub fn seed(&self, reviews: Vec<Review>) {
        self.state.send_replace(Arc::new(reviews));
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Review> {
        self.snapshot().iter().find(|r| r.id == id).cloned()
    }

    pub fn add(&self, new: NewReview, user_id: Uuid) -> Review {
        let review = Review {
            id: Uuid::new_v4(),
            user_id,
            place_id: new.place_id,
            rating: new.rating,
            comment: new.comment,
            created_at: OffsetDateTime::now_utc(),
            owner_response: None,
        };
        let created = review.clone();
        self.state.send_if_modified(|reviews| {
            Arc::make_mut(reviews).push(review);
            true
        });
        self.events.publish(Notification::NewComment {
            place_id: created.place_id,
            comment_id: created.id,
        });
        created
    }

    pub fn by_place(&self, place_id: Uuid) -> Vec<Review> {
        self.snapshot()
            .iter()
            .filter(|r| r.place_id == place_id)
            .cloned()
            .collect()
    }

    pub fn by_user(&self, user_id: Uuid) -> Vec<Review> {
        self.snapshot()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Attaches the owner's response to a review.
    pub fn reply(&self, review_id: Uuid, response: String) -> Result<Review, ReviewError> {
        let mut replied = Err(ReviewError::UnknownReview);
        self.state.send_if_modified(|reviews| {
            let Some(pos) = reviews.iter().position(|r| r.id == review_id) else {
                return false;
            };
            let review = &mut Arc::make_mut(reviews)[pos];
            review.owner_response = Some(response);
            replied = Ok(review.clone());
            true
        });
        let review = replied?;
        self.events.publish(Notification::CommentReply {
            place_id: review.place_id,
            comment_id: review.id,
        });
        Ok(review)
    }

    /// Removes a review; returns whether anything was deleted.
    pub fn delete(&self, review_id: Uuid) -> bool {
        self.state.send_if_modified(|reviews| {
            let before = reviews.len();
            Arc::make_mut(reviews).retain(|r| r.id != review_id);
            reviews.len() != before
        })
    }

    /// Arithmetic mean of the place's ratings, 0.0 when it has none.
    pub fn average_rating(&self, place_id: Uuid) -> f64 {
        let snapshot = self.snapshot();
        let ratings: Vec<u8> = snapshot
            .iter()
            .filter(|r| r.place_id == place_id)
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return 0.0;
        }
        ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64
    }

    pub fn count(&self, place_id: Uuid) -> usize {
        self.snapshot()
            .iter()
            .filter(|r| r.place_id == place_id)
            .count()
    }

    pub fn with_response(&self, place_id: Uuid) -> Vec<Review> {
        self.by_place(place_id)
            .into_iter()
            .filter(|r| r.owner_response.is_some())
            .collect()
    }

    pub fn pending_responses(&self, place_id: Uuid) -> Vec<Review> {
        self.by_place(place_id)
            .into_iter()
            .filter(|r| r.owner_response.is_none())
            .collect()
    }

    /// Newest reviews first, at most `limit` of them.
    pub fn recent(&self, place_id: Uuid, limit: usize) -> Vec<Review> {
        let mut reviews = self.by_place(place_id);
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews.truncate(limit);
        reviews
    }
}
