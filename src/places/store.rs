use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::watch;
use uuid::Uuid;

use crate::events::{EventBus, Notification};
use crate::geo::distance::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    Restaurant,
    FastFood,
    Cafeteria,
    Bakery,
    Bar,
    Nightclub,
    Hotel,
    Museum,
    Park,
    ShoppingMall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Opening hours for one day. Times are "HH:mm" strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub day: Weekday,
    pub open: String,
    pub close: String,
}

/// Explicit moderation tri-state. A rejected place is distinguishable from
/// a pending one without consulting the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Location,
    pub images: Vec<String>,
    pub phones: Vec<String>,
    pub place_type: PlaceType,
    pub schedules: Vec<Schedule>,
    pub status: ModerationStatus,
    pub owner_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approved,
    Rejected,
}

/// Audit entry for one approve/reject decision. Append-only, never pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationRecord {
    pub id: Uuid,
    pub place_id: Uuid,
    pub moderator_id: Uuid,
    pub action: ModerationAction,
    pub reason: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPlace {
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Location,
    pub images: Vec<String>,
    pub phones: Vec<String>,
    pub place_type: PlaceType,
    pub schedules: Vec<Schedule>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModerationError {
    #[error("place not found")]
    UnknownPlace,
}

/// Authoritative list of places plus the moderation audit list. Both live
/// in watch channels; mutations publish a new collection identity and
/// moderation decisions additionally emit notification events.
pub struct PlaceStore {
    state: watch::Sender<Arc<Vec<Place>>>,
    records: watch::Sender<Arc<Vec<ModerationRecord>>>,
    events: EventBus,
}

impl PlaceStore {
    pub fn new(events: EventBus) -> Self {
        let (state, _) = watch::channel(Arc::new(Vec::new()));
        let (records, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            state,
            records,
            events,
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<Place>> {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<Arc<Vec<Place>>> {
        self.state.subscribe()
    }

    /// The full moderation history, oldest first.
    pub fn moderation_records(&self) -> Arc<Vec<ModerationRecord>> {
        self.records.borrow().clone()
    }

    pub fn watch_moderation_records(&self) -> watch::Receiver<Arc<Vec<ModerationRecord>>> {
        self.records.subscribe()
    }

    /// Replaces the list with a fixed demo set. Not a persistence mechanism.
    pub fn seed(&self, places: Vec<Place>) {
        self.state.send_replace(Arc::new(places));
    }

    /// Appends a new place owned by `owner_id`, starting in Pending.
    pub fn create(&self, new: NewPlace, owner_id: Uuid) -> Place {
        let place = Place {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            address: new.address,
            location: new.location,
            images: new.images,
            phones: new.phones,
            place_type: new.place_type,
            schedules: new.schedules,
            status: ModerationStatus::Pending,
            owner_id: Some(owner_id),
            created_at: OffsetDateTime::now_utc(),
        };
        let created = place.clone();
        self.state.send_if_modified(|places| {
            Arc::make_mut(places).push(place);
            true
        });
        created
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Place> {
        self.snapshot().iter().find(|p| p.id == id).cloned()
    }

    pub fn find_by_type(&self, place_type: PlaceType) -> Vec<Place> {
        self.snapshot()
            .iter()
            .filter(|p| p.place_type == place_type)
            .cloned()
            .collect()
    }

    /// Substring title search, ignoring case.
    pub fn find_by_name(&self, needle: &str) -> Vec<Place> {
        let needle = needle.to_lowercase();
        self.snapshot()
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn by_owner(&self, owner_id: Uuid) -> Vec<Place> {
        self.snapshot()
            .iter()
            .filter(|p| p.owner_id == Some(owner_id))
            .cloned()
            .collect()
    }

    pub fn pending(&self) -> Vec<Place> {
        self.by_status(ModerationStatus::Pending)
    }

    pub fn approved(&self) -> Vec<Place> {
        self.by_status(ModerationStatus::Approved)
    }

    fn by_status(&self, status: ModerationStatus) -> Vec<Place> {
        self.snapshot()
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }

    /// Marks the place approved and appends exactly one audit record.
    pub fn approve(&self, place_id: Uuid, moderator_id: Uuid) -> Result<Place, ModerationError> {
        let place = self.decide(place_id, moderator_id, ModerationAction::Approved, None)?;
        self.events.publish(Notification::PlaceApproved { place_id });
        Ok(place)
    }

    /// Marks the place rejected; the reason lands in the audit record.
    pub fn reject(
        &self,
        place_id: Uuid,
        moderator_id: Uuid,
        reason: Option<String>,
    ) -> Result<Place, ModerationError> {
        let place = self.decide(
            place_id,
            moderator_id,
            ModerationAction::Rejected,
            reason.clone(),
        )?;
        self.events
            .publish(Notification::PlaceRejected { place_id, reason });
        Ok(place)
    }

    fn decide(
        &self,
        place_id: Uuid,
        moderator_id: Uuid,
        action: ModerationAction,
        reason: Option<String>,
    ) -> Result<Place, ModerationError> {
        let mut decided = Err(ModerationError::UnknownPlace);
        self.state.send_if_modified(|places| {
            let Some(pos) = places.iter().position(|p| p.id == place_id) else {
                return false;
            };
            let place = &mut Arc::make_mut(places)[pos];
            place.status = match action {
                ModerationAction::Approved => ModerationStatus::Approved,
                ModerationAction::Rejected => ModerationStatus::Rejected,
            };
            decided = Ok(place.clone());
            true
        });
        let place = decided?;

        self.records.send_if_modified(|records| {
            Arc::make_mut(records).push(ModerationRecord {
                id: Uuid::new_v4(),
                place_id,
                moderator_id,
                action,
                reason,
                created_at: OffsetDateTime::now_utc(),
            });
            true
        });
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PlaceStore {
        PlaceStore::new(EventBus::default())
    }

    fn new_place(title: &str, place_type: PlaceType) -> NewPlace {
        NewPlace {
            title: title.into(),
            description: "somewhere to be".into(),
            address: "Cra 14 # 10-25".into(),
            location: Location {
                lat: 4.5339,
                lng: -75.6811,
            },
            images: vec!["https://img.example.com/1.jpg".into()],
            phones: vec!["7451234".into()],
            place_type,
            schedules: vec![Schedule {
                day: Weekday::Monday,
                open: "08:00".into(),
                close: "18:00".into(),
            }],
        }
    }

    #[test]
    fn created_places_start_pending_and_owned() {
        let store = store();
        let owner = Uuid::new_v4();
        let place = store.create(new_place("Café del Parque", PlaceType::Cafeteria), owner);
        assert_eq!(place.status, ModerationStatus::Pending);
        assert_eq!(place.owner_id, Some(owner));
        assert_eq!(store.pending().len(), 1);
        assert!(store.approved().is_empty());
    }

    #[test]
    fn approve_sets_status_and_appends_exactly_one_record() {
        let store = store();
        let moderator = Uuid::new_v4();
        let place = store.create(new_place("Hotel Mirador", PlaceType::Hotel), Uuid::new_v4());

        let approved = store.approve(place.id, moderator).expect("known place");
        assert_eq!(approved.status, ModerationStatus::Approved);

        let records = store.moderation_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].place_id, place.id);
        assert_eq!(records[0].moderator_id, moderator);
        assert_eq!(records[0].action, ModerationAction::Approved);
        assert_eq!(records[0].reason, None);
    }

    #[test]
    fn reject_keeps_the_place_distinguishable_from_pending() {
        let store = store();
        let place = store.create(new_place("Bar Esquina", PlaceType::Bar), Uuid::new_v4());
        store
            .reject(place.id, Uuid::new_v4(), Some("duplicate listing".into()))
            .expect("known place");

        let rejected = store.find_by_id(place.id).expect("still present");
        assert_eq!(rejected.status, ModerationStatus::Rejected);
        assert!(store.pending().is_empty());

        let records = store.moderation_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, ModerationAction::Rejected);
        assert_eq!(records[0].reason.as_deref(), Some("duplicate listing"));
    }

    #[test]
    fn moderating_an_unknown_place_leaves_the_audit_log_alone() {
        let store = store();
        let err = store.approve(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert_eq!(err, ModerationError::UnknownPlace);
        assert!(store.moderation_records().is_empty());
    }

    #[test]
    fn audit_log_is_append_only_across_decisions() {
        let store = store();
        let moderator = Uuid::new_v4();
        let a = store.create(new_place("Museo del Oro", PlaceType::Museum), Uuid::new_v4());
        let b = store.create(new_place("Parque Central", PlaceType::Park), Uuid::new_v4());

        store.approve(a.id, moderator).expect("known place");
        store
            .reject(b.id, moderator, Some("no address".into()))
            .expect("known place");
        store.approve(b.id, moderator).expect("re-review is recorded too");

        let records = store.moderation_records();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn name_search_ignores_case() {
        let store = store();
        for i in 1..=5 {
            store.create(new_place(&format!("Bar test {i}"), PlaceType::Bar), Uuid::new_v4());
        }
        store.create(new_place("Cafetería test", PlaceType::Cafeteria), Uuid::new_v4());

        assert_eq!(store.find_by_name("bar").len(), 5);
        assert_eq!(store.find_by_name("BAR TEST 3").len(), 1);
        assert!(store.find_by_name("hotel").is_empty());
    }

    #[test]
    fn type_and_owner_filters() {
        let store = store();
        let owner = Uuid::new_v4();
        store.create(new_place("La Fonda", PlaceType::Restaurant), owner);
        store.create(new_place("El Rincón", PlaceType::Restaurant), Uuid::new_v4());
        store.create(new_place("Disco Nova", PlaceType::Nightclub), owner);

        assert_eq!(store.find_by_type(PlaceType::Restaurant).len(), 2);
        assert_eq!(store.by_owner(owner).len(), 2);
    }

    #[tokio::test]
    async fn watchers_see_moderation_outcomes() {
        let store = store();
        let mut places_rx = store.watch();
        let mut records_rx = store.watch_moderation_records();
        let before = store.snapshot();

        let place = store.create(new_place("Centro Comercial Portal", PlaceType::ShoppingMall), Uuid::new_v4());
        places_rx.changed().await.expect("store alive");
        assert!(before.is_empty(), "old snapshot must stay untouched");

        store.approve(place.id, Uuid::new_v4()).expect("known place");
        records_rx.changed().await.expect("store alive");
        assert_eq!(records_rx.borrow().len(), 1);
    }

    #[tokio::test]
    async fn approve_publishes_a_place_approved_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let store = PlaceStore::new(bus);
        let place = store.create(new_place("Panadería Sol", PlaceType::Bakery), Uuid::new_v4());
        store.approve(place.id, Uuid::new_v4()).expect("known place");

        assert_eq!(
            rx.recv().await.expect("event delivered"),
            Notification::PlaceApproved { place_id: place.id }
        );
    }
}
