use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{dto::PublicUser, extractors::AuthUser},
    state::AppState,
};

use super::dto::{FavoriteToggle, UpdateProfileRequest};

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/me/favorites", get(list_favorites))
        .route("/me/favorites/:place_id", put(toggle_favorite))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    state
        .users
        .find_by_id(user_id)
        .map(|user| Json(PublicUser::from(user)))
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".into()))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    if state.users.find_by_id(user_id).is_none() {
        return Err((StatusCode::UNAUTHORIZED, "User not found".into()));
    }

    state
        .users
        .update_profile(user_id, payload.name, payload.username, payload.locality);

    let updated = state
        .users
        .find_by_id(user_id)
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".into()))?;

    info!(user_id = %user_id, "profile updated");
    Ok(Json(PublicUser::from(updated)))
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<Vec<Uuid>> {
    Json(state.users.favorites(user_id))
}

#[instrument(skip(state))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(place_id): Path<Uuid>,
) -> Result<Json<FavoriteToggle>, (StatusCode, String)> {
    if state.places.find_by_id(place_id).is_none() {
        return Err((StatusCode::NOT_FOUND, "Place not found".into()));
    }

    let favorite = state
        .users
        .toggle_favorite(user_id, place_id)
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".into()))?;

    info!(user_id = %user_id, place_id = %place_id, favorite, "favorite toggled");
    Ok(Json(FavoriteToggle { place_id, favorite }))
}
