pub mod distance;
pub mod handlers;
pub mod regions;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::geo_routes()
}
