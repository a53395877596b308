use super::coordinator::CoordinatorHandle;
use super::handler::ws_handler;
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// `/ws` for scoreboard sessions, plus the static client page when a directory is given.
pub fn create_router(coordinator: CoordinatorHandle, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(coordinator);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
