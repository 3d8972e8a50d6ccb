use time::OffsetDateTime;
use uuid::Uuid;

use crate::geo::distance::Location;

use super::store::{ModerationStatus, Place, PlaceType, Schedule, Weekday};

fn weekdays(open: &str, close: &str) -> Vec<Schedule> {
    [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ]
    .into_iter()
    .map(|day| Schedule {
        day,
        open: open.into(),
        close: close.into(),
    })
    .collect()
}

fn place(
    title: &str,
    description: &str,
    address: &str,
    location: Location,
    place_type: PlaceType,
    status: ModerationStatus,
    owner_id: Uuid,
) -> Place {
    Place {
        id: Uuid::new_v4(),
        title: title.into(),
        description: description.into(),
        address: address.into(),
        location,
        images: vec![format!(
            "https://images.unilocal.co/demo/{}.jpg",
            title.to_lowercase().replace(' ', "-")
        )],
        phones: vec!["6067401234".into()],
        place_type,
        schedules: weekdays("08:00", "18:00"),
        status,
        owner_id: Some(owner_id),
        created_at: OffsetDateTime::now_utc(),
    }
}

/// Fixed demo data set around Armenia, Quindío. Most entries are already
/// approved so the public listing is not empty on first run; one stays
/// pending so the moderation queue has work.
pub fn demo_places(owner_id: Uuid) -> Vec<Place> {
    vec![
        place(
            "Café del Parque",
            "Specialty coffee from local farms, two blocks from Plaza de Bolívar.",
            "Cra 14 # 20-15, Armenia",
            Location {
                lat: 4.5351,
                lng: -75.6757,
            },
            PlaceType::Cafeteria,
            ModerationStatus::Approved,
            owner_id,
        ),
        place(
            "La Fogata Quindiana",
            "Traditional bandeja paisa and grilled trout.",
            "Cl 21 # 16-30, Armenia",
            Location {
                lat: 4.5322,
                lng: -75.6810,
            },
            PlaceType::Restaurant,
            ModerationStatus::Approved,
            owner_id,
        ),
        place(
            "Hotel Mirador del Café",
            "Boutique hotel overlooking the coffee landscape.",
            "Km 3 vía Circasia",
            Location {
                lat: 4.5721,
                lng: -75.6902,
            },
            PlaceType::Hotel,
            ModerationStatus::Approved,
            owner_id,
        ),
        place(
            "Museo del Oro Quimbaya",
            "Pre-Columbian goldwork of the Quimbaya culture.",
            "Av Bolívar # 40N-80, Armenia",
            Location {
                lat: 4.5583,
                lng: -75.6595,
            },
            PlaceType::Museum,
            ModerationStatus::Approved,
            owner_id,
        ),
        place(
            "Bar La Esquina",
            "Craft beer and vinyl nights.",
            "Cl 10 # 14-02, Armenia",
            Location {
                lat: 4.5308,
                lng: -75.6849,
            },
            PlaceType::Bar,
            ModerationStatus::Pending,
            owner_id,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_set_leaves_work_in_the_moderation_queue() {
        let places = demo_places(Uuid::new_v4());
        assert_eq!(places.len(), 5);
        assert!(places
            .iter()
            .any(|p| p.status == ModerationStatus::Pending));
        assert!(places
            .iter()
            .filter(|p| p.status == ModerationStatus::Approved)
            .count()
            >= 3);
    }
}
