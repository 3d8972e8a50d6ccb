use axum::{
    extract::Path,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::state::AppState;

use super::regions;

pub fn geo_routes() -> Router<AppState> {
    Router::new()
        .route("/geo/regions", get(list_regions))
        .route("/geo/regions/:region", get(region_localities))
}

#[instrument]
pub async fn list_regions() -> Json<Vec<&'static str>> {
    Json(regions::regions())
}

#[instrument]
pub async fn region_localities(
    Path(region): Path<String>,
) -> Result<Json<Vec<&'static str>>, (StatusCode, String)> {
    match regions::localities(&region) {
        Some(towns) => Ok(Json(towns.to_vec())),
        None => Err((StatusCode::NOT_FOUND, "Unknown region".into())),
    }
}
