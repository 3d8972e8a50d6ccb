use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::{AdminUser, AuthUser},
    geo::distance::{format_distance, haversine_km, Location},
    state::AppState,
};

use super::dto::{CreatePlaceRequest, DistanceQuery, DistanceResponse, PlacesQuery, RejectRequest};
use super::store::{ModerationError, ModerationRecord, ModerationStatus, NewPlace, Place};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/places", get(list_places).post(create_place))
        .route("/places/mine", get(my_places))
        .route("/places/:id", get(get_place))
        .route("/places/:id/distance", get(place_distance))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/places/pending", get(pending_places))
        .route("/admin/places/:id/approve", post(approve_place))
        .route("/admin/places/:id/reject", post(reject_place))
        .route("/admin/moderation-records", get(moderation_records))
}

/// Approved places only, optionally narrowed by type and title substring.
#[instrument(skip(state))]
pub async fn list_places(
    State(state): State<AppState>,
    Query(query): Query<PlacesQuery>,
) -> Json<Vec<Place>> {
    let mut places = if let Some(name) = &query.name {
        state.places.find_by_name(name)
    } else if let Some(place_type) = query.place_type {
        state.places.find_by_type(place_type)
    } else {
        state.places.approved()
    };
    places.retain(|p| p.status == ModerationStatus::Approved);
    if let Some(place_type) = query.place_type {
        places.retain(|p| p.place_type == place_type);
    }
    Json(places)
}

#[instrument(skip(state))]
pub async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Place>, (StatusCode, String)> {
    match state.places.find_by_id(id) {
        Some(place) if place.status == ModerationStatus::Approved => Ok(Json(place)),
        _ => Err((StatusCode::NOT_FOUND, "Place not found".into())),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_place(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<Place>), (StatusCode, String)> {
    if payload.title.trim().is_empty() {
        warn!("place submitted without a title");
        return Err((StatusCode::BAD_REQUEST, "Title is required".into()));
    }

    let place = state.places.create(
        NewPlace {
            title: payload.title,
            description: payload.description,
            address: payload.address,
            location: payload.location,
            images: payload.images,
            phones: payload.phones,
            place_type: payload.place_type,
            schedules: payload.schedules,
        },
        user_id,
    );

    info!(place_id = %place.id, owner_id = %user_id, "place submitted for moderation");
    Ok((StatusCode::CREATED, Json(place)))
}

/// The caller's own places, whatever their moderation status.
#[instrument(skip(state))]
pub async fn my_places(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<Vec<Place>> {
    Json(state.places.by_owner(user_id))
}

#[instrument(skip(state))]
pub async fn place_distance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DistanceQuery>,
) -> Result<Json<DistanceResponse>, (StatusCode, String)> {
    let place = state
        .places
        .find_by_id(id)
        .ok_or((StatusCode::NOT_FOUND, "Place not found".to_string()))?;

    let from = Location {
        lat: query.lat,
        lng: query.lng,
    };
    let km = haversine_km(&from, &place.location);
    Ok(Json(DistanceResponse {
        from,
        km,
        formatted: format_distance(km),
    }))
}

#[instrument(skip(state, admin))]
pub async fn pending_places(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Json<Vec<Place>> {
    Json(state.places.pending())
}

#[instrument(skip(state, admin))]
pub async fn approve_place(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Place>, (StatusCode, String)> {
    let AdminUser(moderator) = admin;
    let place = state
        .places
        .approve(id, moderator.id)
        .map_err(moderation_rejection)?;
    info!(place_id = %id, moderator_id = %moderator.id, "place approved");
    Ok(Json(place))
}

#[instrument(skip(state, admin, payload))]
pub async fn reject_place(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> Result<Json<Place>, (StatusCode, String)> {
    let AdminUser(moderator) = admin;
    let place = state
        .places
        .reject(id, moderator.id, payload.reason)
        .map_err(moderation_rejection)?;
    info!(place_id = %id, moderator_id = %moderator.id, "place rejected");
    Ok(Json(place))
}

#[instrument(skip(state, admin))]
pub async fn moderation_records(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Json<Vec<ModerationRecord>> {
    Json(state.places.moderation_records().to_vec())
}

fn moderation_rejection(err: ModerationError) -> (StatusCode, String) {
    match err {
        ModerationError::UnknownPlace => (StatusCode::NOT_FOUND, err.to_string()),
    }
}
