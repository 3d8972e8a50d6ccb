use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        jwt::JwtKeys,
        password::hash_password,
    },
    state::AppState,
    users::store::{NewUser, RegisterError, User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn register_rejection(err: RegisterError) -> (StatusCode, String) {
    let status = match err {
        RegisterError::EmailTaken => StatusCode::CONFLICT,
        RegisterError::InvalidEmail | RegisterError::WeakPassword => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}

fn token_pair(
    keys: &JwtKeys,
    user: &User,
) -> Result<(String, String), (StatusCode, String)> {
    let access_token = keys.sign_access(user.id).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let refresh_token = keys.sign_refresh(user.id).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok((access_token, refresh_token))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(register_rejection(RegisterError::InvalidEmail));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(register_rejection(RegisterError::WeakPassword));
    }

    // Cheap pre-check; the store enforces uniqueness again on insert.
    if state.users.exists_by_email(&payload.email) {
        warn!(email = %payload.email, "email already registered");
        return Err(register_rejection(RegisterError::EmailTaken));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let user = state
        .users
        .register(NewUser {
            name: payload.name,
            lastname: payload.lastname,
            email: payload.email,
            phone: payload.phone,
            password_hash,
        })
        .map_err(|e| {
            warn!(error = %e, "registration rejected");
            register_rejection(e)
        })?;

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = token_pair(&keys, &user)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let Some(user) = state.users.verify_credentials(&payload.email, &payload.password) else {
        warn!(email = %payload.email, "login rejected");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    };

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = token_pair(&keys, &user)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

    let user = state
        .users
        .find_by_id(claims.sub)
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    // Issue a new pair
    let (access_token, refresh_token) = token_pair(&keys, &user)?;

    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses_only() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two words@example.com"));
    }

    #[test]
    fn public_user_carries_no_credential_material() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            name: "Ana García".into(),
            username: "ana".into(),
            phone: "3001234567".into(),
            email: "ana@example.com".into(),
            password_hash: "secret-hash".into(),
            region: "Quindío".into(),
            locality: "Armenia".into(),
            role: crate::users::store::Role::User,
            favorites: vec![],
        };
        let json = serde_json::to_string(&PublicUser::from(user)).expect("serializable");
        assert!(json.contains("ana@example.com"));
        assert!(!json.contains("secret-hash"));
    }
}
