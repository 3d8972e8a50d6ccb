use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod seed;
pub mod store;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::public_routes())
        .merge(handlers::admin_routes())
}
