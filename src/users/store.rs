use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

use crate::auth::password;

/// Region and locality applied when a registration does not name them.
pub const DEFAULT_REGION: &str = "Quindío";
pub const DEFAULT_LOCALITY: &str = "Armenia";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub region: String,
    pub locality: String,
    pub role: Role,
    pub favorites: Vec<Uuid>,
}

/// Registration input. The email must already be trimmed and lowercased
/// and the password already hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email")]
    InvalidEmail,
    #[error("password too short")]
    WeakPassword,
}

/// Authoritative list of users. The backing collection lives inside a
/// watch channel: every mutation publishes a new `Arc<Vec<User>>` while
/// snapshots held by observers stay untouched.
pub struct UserStore {
    state: watch::Sender<Arc<Vec<User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(Vec::new()));
        Self { state: tx }
    }

    /// Current list. Cheap: clones the `Arc`, not the collection.
    pub fn snapshot(&self) -> Arc<Vec<User>> {
        self.state.borrow().clone()
    }

    /// Change notifications for observers.
    pub fn watch(&self) -> watch::Receiver<Arc<Vec<User>>> {
        self.state.subscribe()
    }

    /// Replaces the whole list with seed data.
    pub fn seed(&self, users: Vec<User>) {
        self.state.send_replace(Arc::new(users));
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.snapshot().iter().find(|u| u.id == id).cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.snapshot()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn exists_by_email(&self, email: &str) -> bool {
        self.snapshot()
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Appends a new user unless the email is already taken. Uniqueness is
    /// only enforced here, at registration time.
    pub fn register(&self, new: NewUser) -> Result<User, RegisterError> {
        let mut result = Err(RegisterError::EmailTaken);
        self.state.send_if_modified(|users| {
            if users.iter().any(|u| u.email.eq_ignore_ascii_case(&new.email)) {
                return false;
            }
            let user = User {
                id: Uuid::new_v4(),
                name: format!("{} {}", new.name.trim(), new.lastname.trim()),
                username: String::new(),
                phone: new.phone,
                email: new.email,
                password_hash: new.password_hash,
                region: DEFAULT_REGION.to_string(),
                locality: DEFAULT_LOCALITY.to_string(),
                role: Role::User,
                favorites: Vec::new(),
            };
            result = Ok(user.clone());
            Arc::make_mut(users).push(user);
            true
        });
        result
    }

    /// Email + password login. Absent user and wrong password are
    /// indistinguishable to the caller.
    pub fn verify_credentials(&self, email: &str, plain_password: &str) -> Option<User> {
        let user = self.find_by_email(email)?;
        match password::verify_password(plain_password, &user.password_hash) {
            Ok(true) => Some(user),
            Ok(false) => None,
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "stored password hash is unreadable");
                None
            }
        }
    }

    /// Idempotent favorite toggle: removes the place if bookmarked, appends
    /// it otherwise. Returns whether the place is now a favorite, or `None`
    /// when the user is unknown (a no-op).
    pub fn toggle_favorite(&self, user_id: Uuid, place_id: Uuid) -> Option<bool> {
        let mut now_favorite = None;
        self.state.send_if_modified(|users| {
            let Some(pos) = users.iter().position(|u| u.id == user_id) else {
                return false;
            };
            let favorites = &mut Arc::make_mut(users)[pos].favorites;
            match favorites.iter().position(|p| *p == place_id) {
                Some(i) => {
                    favorites.remove(i);
                    now_favorite = Some(false);
                }
                None => {
                    favorites.push(place_id);
                    now_favorite = Some(true);
                }
            }
            true
        });
        now_favorite
    }

    /// Ordered favorite place ids; empty when the user is unknown.
    pub fn favorites(&self, user_id: Uuid) -> Vec<Uuid> {
        self.find_by_id(user_id)
            .map(|u| u.favorites)
            .unwrap_or_default()
    }

    /// Replaces exactly name, username and locality. Silent no-op when the
    /// user is unknown.
    pub fn update_profile(&self, user_id: Uuid, name: String, username: String, locality: String) {
        self.state.send_if_modified(|users| {
            let Some(pos) = users.iter().position(|u| u.id == user_id) else {
                return false;
            };
            let user = &mut Arc::make_mut(users)[pos];
            user.name = name;
            user.username = username;
            user.locality = locality;
            true
        });
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ana".into(),
            lastname: "García".into(),
            email: email.into(),
            phone: "3001234567".into(),
            // Argon2 is deliberately not exercised here; credential tests do that.
            password_hash: "fake-hash".into(),
        }
    }

    #[test]
    fn register_assigns_defaults_and_concatenates_name() {
        let store = UserStore::new();
        let user = store.register(new_user("ana@example.com")).expect("fresh email");
        assert_eq!(user.name, "Ana García");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.region, DEFAULT_REGION);
        assert_eq!(user.locality, DEFAULT_LOCALITY);
        assert!(user.favorites.is_empty());
    }

    #[test]
    fn duplicate_email_fails_and_leaves_count_unchanged() {
        let store = UserStore::new();
        store.register(new_user("ana@example.com")).expect("fresh email");
        let err = store.register(new_user("ana@example.com")).unwrap_err();
        assert_eq!(err, RegisterError::EmailTaken);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn exists_by_email_is_case_insensitive_after_register() {
        let store = UserStore::new();
        store.register(new_user("ana@example.com")).expect("fresh email");
        assert!(store.exists_by_email("ANA@Example.COM"));
        assert!(!store.exists_by_email("other@example.com"));
    }

    #[test]
    fn toggle_favorite_twice_is_an_involution() {
        let store = UserStore::new();
        let user = store.register(new_user("ana@example.com")).expect("fresh email");
        let place_id = Uuid::new_v4();

        assert_eq!(store.toggle_favorite(user.id, place_id), Some(true));
        assert_eq!(store.favorites(user.id), vec![place_id]);
        assert_eq!(store.toggle_favorite(user.id, place_id), Some(false));
        assert!(store.favorites(user.id).is_empty());
    }

    #[test]
    fn toggle_favorite_for_unknown_user_is_a_no_op() {
        let store = UserStore::new();
        assert_eq!(store.toggle_favorite(Uuid::new_v4(), Uuid::new_v4()), None);
        assert!(store.favorites(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn update_profile_replaces_only_the_three_fields() {
        let store = UserStore::new();
        let user = store.register(new_user("ana@example.com")).expect("fresh email");
        store.update_profile(user.id, "Ana María".into(), "anamaria".into(), "Salento".into());

        let updated = store.find_by_id(user.id).expect("still present");
        assert_eq!(updated.name, "Ana María");
        assert_eq!(updated.username, "anamaria");
        assert_eq!(updated.locality, "Salento");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.phone, user.phone);
        assert_eq!(updated.region, user.region);
    }

    #[test]
    fn update_profile_for_unknown_user_is_a_no_op() {
        let store = UserStore::new();
        store.register(new_user("ana@example.com")).expect("fresh email");
        let before = store.snapshot();
        store.update_profile(Uuid::new_v4(), "x".into(), "x".into(), "x".into());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn mutations_publish_a_new_collection_identity() {
        let store = UserStore::new();
        let before = store.snapshot();
        store.register(new_user("ana@example.com")).expect("fresh email");
        let after = store.snapshot();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(before.is_empty(), "old snapshot must stay untouched");
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn verify_credentials_accepts_the_correct_password_only() {
        let store = UserStore::new();
        let mut registration = new_user("ana@example.com");
        registration.password_hash =
            password::hash_password("correct-horse-battery-staple").expect("hashing succeeds");
        store.register(registration).expect("fresh email");

        assert!(store
            .verify_credentials("ana@example.com", "correct-horse-battery-staple")
            .is_some());
        assert!(store.verify_credentials("ana@example.com", "wrong").is_none());
        assert!(store
            .verify_credentials("ghost@example.com", "correct-horse-battery-staple")
            .is_none());
    }

    #[tokio::test]
    async fn watchers_are_notified_on_change() {
        let store = UserStore::new();
        let mut rx = store.watch();
        store.register(new_user("ana@example.com")).expect("fresh email");
        rx.changed().await.expect("store alive");
        assert_eq!(rx.borrow().len(), 1);
    }
}
