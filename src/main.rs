mod app;
mod auth;
mod config;
mod events;
mod geo;
mod places;
mod reviews;
mod state;
mod users;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "unilocal=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init()?;

    if state.config.seed_demo {
        state.seed_demo()?;
    }

    // Notification payloads are consumed by a logging subscriber; push
    // delivery belongs to an external collaborator.
    let _logger = events::spawn_logger(&state.events);

    let app = app::build_app(state);
    app::serve(app).await
}
