//! Router assembly.

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{path::Path, sync::Arc};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    auth::{self, AppState},
    items::{self, ItemStore},
};

/// Builds the application router.
///
/// - `/api/auth/*` authentication endpoints
/// - `/api/items*` when a document store is available
/// - `/health`
/// - the built frontend from `static_dir`, if that directory exists: files
///   under `/assets`, and `index.html` for every other unmatched path
pub fn build_router(
    state: Arc<AppState>,
    items: Option<Arc<ItemStore>>,
    static_dir: &Path,
) -> Router {
    let mut router = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/session", get(auth::get_session))
        .route("/api/auth/logout", post(auth::logout))
        .route("/health", get(health));

    if let Some(store) = items {
        router = router.nest("/api", items::router(store));
    }

    if static_dir.is_dir() {
        tracing::info!(static_dir = %static_dir.display(), "serving frontend");
        router = router
            .nest_service("/assets", ServeDir::new(static_dir.join("assets")))
            .fallback_service(ServeFile::new(static_dir.join("index.html")));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
