use serde::{Deserialize, Serialize};

use crate::geo::distance::Location;

use super::store::{PlaceType, Schedule};

#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Location,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    pub place_type: PlaceType,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// Optional listing filters.
#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<PlaceType>,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub from: Location,
    pub km: f64,
    pub formatted: String,
}
