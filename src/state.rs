use std::sync::Arc;

use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::auth::password;
use crate::config::AppConfig;
use crate::events::EventBus;
use crate::places::{seed, store::PlaceStore};
use crate::reviews::store::{Review, ReviewStore};
use crate::users::store::{Role, User, UserStore, DEFAULT_LOCALITY, DEFAULT_REGION};

/// Shared application context. Every handler receives it through axum's
/// `State`; nothing reaches the stores through ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub places: Arc<PlaceStore>,
    pub reviews: Arc<ReviewStore>,
    pub config: Arc<AppConfig>,
    pub events: EventBus,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Arc<AppConfig>) -> Self {
        let events = EventBus::default();
        Self {
            users: Arc::new(UserStore::new()),
            places: Arc::new(PlaceStore::new(events.clone())),
            reviews: Arc::new(ReviewStore::new(events.clone())),
            config,
            events,
        }
    }

    /// Replaces the stores' contents with the fixed demo data set.
    pub fn seed_demo(&self) -> anyhow::Result<()> {
        let admin = User {
            id: Uuid::new_v4(),
            name: "Moderación UniLocal".into(),
            username: "moderacion".into(),
            phone: "3000000000".into(),
            email: "moderacion@unilocal.co".into(),
            password_hash: password::hash_password("moderacion-2024")?,
            region: DEFAULT_REGION.into(),
            locality: DEFAULT_LOCALITY.into(),
            role: Role::Admin,
            favorites: Vec::new(),
        };
        let visitor = User {
            id: Uuid::new_v4(),
            name: "Ana García".into(),
            username: "anagarcia".into(),
            phone: "3001234567".into(),
            email: "ana@example.com".into(),
            password_hash: password::hash_password("hunter2-hunter2")?,
            region: DEFAULT_REGION.into(),
            locality: DEFAULT_LOCALITY.into(),
            role: Role::User,
            favorites: Vec::new(),
        };
        let owner_id = visitor.id;
        let reviewer_id = admin.id;

        self.users.seed(vec![admin, visitor]);

        let places = seed::demo_places(owner_id);
        let cafe_id = places[0].id;
        self.places.seed(places);

        self.reviews.seed(vec![Review {
            id: Uuid::new_v4(),
            user_id: reviewer_id,
            place_id: cafe_id,
            rating: 5,
            comment: "Best pour-over in Armenia.".into(),
            created_at: OffsetDateTime::now_utc(),
            owner_response: None,
        }]);

        warn!("demo seed loaded; its credentials are fixed and not for production use");
        Ok(())
    }

    /// State for unit tests: fixed JWT material, empty stores.
    pub fn fake() -> Self {
        use crate::config::JwtConfig;

        let config = Arc::new(AppConfig {
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            seed_demo: false,
        });
        Self::from_config(config)
    }
}
