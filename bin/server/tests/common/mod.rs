//! Test utilities and common setup.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header},
};
use gatehouse_identity::{AuthService, IdentityClient, IdentityConfig};
use gatehouse_server::{
    app::build_router,
    auth::AppState,
    config::{CookieConfig, ServerConfig},
    items::ItemStore,
};
use serde_json::Value;
use std::{path::Path, sync::Arc};
use wiremock::MockServer;

/// Path that never exists, so no frontend is served.
const NO_STATIC_DIR: &str = "/nonexistent/gatehouse-static";

fn app_state(provider_url: &str, auth_enabled: bool) -> Arc<AppState> {
    let mut config = ServerConfig::default();
    config.auth.enabled = auth_enabled;
    config.kratos = IdentityConfig::new(provider_url).with_timeout_seconds(5);

    let client = IdentityClient::new(&config.kratos).expect("identity client");
    Arc::new(AppState::from_config(AuthService::new(client), &config))
}

/// Create a test application with authentication enabled, backed by a mock provider.
pub fn test_app(provider: &MockServer) -> Router {
    build_router(
        app_state(&provider.uri(), true),
        None,
        Path::new(NO_STATIC_DIR),
    )
}

/// Create a test application with authentication disabled.
///
/// The provider URL points at a closed port; any call to it would fail.
pub fn test_app_auth_disabled() -> Router {
    build_router(
        app_state("http://127.0.0.1:1", false),
        None,
        Path::new(NO_STATIC_DIR),
    )
}

/// Create a test application serving a built frontend from `static_dir`.
pub fn test_app_with_static(static_dir: &Path) -> Router {
    build_router(app_state("http://127.0.0.1:1", false), None, static_dir)
}

/// Create a test application with the items routes mounted.
///
/// The MongoDB client connects lazily, so requests that fail validation
/// never reach the server.
pub async fn test_app_with_items() -> Router {
    let client = mongodb::Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=500")
        .await
        .expect("mongo client");
    let store = ItemStore::new(&client.database("gatehouse_test"));

    build_router(
        app_state("http://127.0.0.1:1", false),
        Some(Arc::new(store)),
        Path::new(NO_STATIC_DIR),
    )
}

/// Builds a JSON request.
pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("body")))
        .expect("request")
}

/// Builds a bodyless request, optionally carrying a `Cookie` header.
pub fn request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

/// Reads the response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json body")
}

/// Returns the `Set-Cookie` header for the session cookie, if any.
pub fn session_set_cookie(response: &Response<Body>) -> Option<String> {
    let name = format!("{}=", CookieConfig::default().name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&name))
        .map(str::to_string)
}
