use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: &Location, b: &Location) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Human-readable distance: meters below one kilometer, otherwise
/// kilometers with one decimal.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1} km", km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARMENIA: Location = Location {
        lat: 4.5339,
        lng: -75.6811,
    };
    const BOGOTA: Location = Location {
        lat: 4.7110,
        lng: -74.0721,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_km(&ARMENIA, &ARMENIA).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(&ARMENIA, &BOGOTA);
        let back = haversine_km(&BOGOTA, &ARMENIA);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn armenia_to_bogota_is_plausible() {
        // Roughly 180 km as the crow flies.
        let km = haversine_km(&ARMENIA, &BOGOTA);
        assert!(km > 150.0 && km < 210.0, "got {km}");
    }

    #[test]
    fn formats_meters_below_one_km() {
        assert_eq!(format_distance(0.05), "50 m");
        assert_eq!(format_distance(0.999), "999 m");
    }

    #[test]
    fn formats_kilometers_with_one_decimal() {
        assert_eq!(format_distance(2.345), "2.3 km");
        assert_eq!(format_distance(1.0), "1.0 km");
    }
}
