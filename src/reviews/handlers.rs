use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::{AdminUser, AuthUser},
    state::AppState,
};

use super::dto::{CreateReviewRequest, RatingSummary, RecentQuery, ReplyRequest, ReviewsQuery};
use super::store::{NewReview, Review, ReviewError};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/places/:id/reviews", get(list_for_place).post(create_for_place))
        .route("/places/:id/reviews/recent", get(recent_for_place))
        .route("/places/:id/rating", get(place_rating))
        .route("/reviews/:id/reply", post(reply_to_review))
        .route("/reviews/:id", delete(delete_review))
        .route("/me/reviews", get(my_reviews))
}

#[instrument(skip(state))]
pub async fn list_for_place(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Vec<Review>>, (StatusCode, String)> {
    require_place(&state, place_id)?;
    let reviews = match query.responded {
        Some(true) => state.reviews.with_response(place_id),
        Some(false) => state.reviews.pending_responses(place_id),
        None => state.reviews.by_place(place_id),
    };
    Ok(Json(reviews))
}

#[instrument(skip(state, payload))]
pub async fn create_for_place(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(place_id): Path<Uuid>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), (StatusCode, String)> {
    require_place(&state, place_id)?;

    if !(1..=5).contains(&payload.rating) {
        warn!(rating = payload.rating, "rating out of range");
        return Err((
            StatusCode::BAD_REQUEST,
            "Rating must be between 1 and 5".into(),
        ));
    }

    let review = state.reviews.add(
        NewReview {
            place_id,
            rating: payload.rating,
            comment: payload.comment,
        },
        user_id,
    );

    info!(review_id = %review.id, place_id = %place_id, user_id = %user_id, "review added");
    Ok((StatusCode::CREATED, Json(review)))
}

#[instrument(skip(state))]
pub async fn recent_for_place(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<Review>>, (StatusCode, String)> {
    require_place(&state, place_id)?;
    Ok(Json(state.reviews.recent(place_id, query.limit)))
}

#[instrument(skip(state))]
pub async fn place_rating(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<RatingSummary>, (StatusCode, String)> {
    require_place(&state, place_id)?;
    Ok(Json(RatingSummary {
        average: state.reviews.average_rating(place_id),
        count: state.reviews.count(place_id),
    }))
}

/// Attach the place owner's response to a review.
#[instrument(skip(state, payload))]
pub async fn reply_to_review(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(review_id): Path<Uuid>,
    Json(payload): Json<ReplyRequest>,
) -> Result<Json<Review>, (StatusCode, String)> {
    let review = state
        .reviews
        .find_by_id(review_id)
        .ok_or((StatusCode::NOT_FOUND, "Review not found".to_string()))?;

    let place = state
        .places
        .find_by_id(review.place_id)
        .ok_or((StatusCode::NOT_FOUND, "Place not found".to_string()))?;

    if place.owner_id != Some(user_id) {
        warn!(review_id = %review_id, user_id = %user_id, "reply from non-owner rejected");
        return Err((
            StatusCode::FORBIDDEN,
            "Only the place owner can reply".into(),
        ));
    }

    let replied = state
        .reviews
        .reply(review_id, payload.response)
        .map_err(|e: ReviewError| (StatusCode::NOT_FOUND, e.to_string()))?;

    info!(review_id = %review_id, "owner replied to review");
    Ok(Json(replied))
}

/// Moderation delete.
#[instrument(skip(state, admin))]
pub async fn delete_review(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(review_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let AdminUser(moderator) = admin;
    if !state.reviews.delete(review_id) {
        return Err((StatusCode::NOT_FOUND, "Review not found".into()));
    }
    info!(review_id = %review_id, moderator_id = %moderator.id, "review deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn my_reviews(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<Vec<Review>> {
    Json(state.reviews.by_user(user_id))
}

fn require_place(state: &AppState, place_id: Uuid) -> Result<(), (StatusCode, String)> {
    if state.places.find_by_id(place_id).is_none() {
        return Err((StatusCode::NOT_FOUND, "Place not found".into()));
    }
    Ok(())
}
