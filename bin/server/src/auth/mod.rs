//! Authentication module for the gatehouse server.
//!
//! This module provides:
//! - Login and registration endpoints that proxy the identity provider's
//!   self-service API flows
//! - Session cookie management
//! - The `CurrentUser` extractor that resolves the caller on each request
//!
//! # Session Model
//!
//! The server holds no authentication state. A successful flow hands the
//! provider-issued session token to the browser in an httpOnly cookie, and
//! every authenticated request re-validates that token with the provider.
//! Logging out only removes the cookie.
//!
//! When authentication is disabled (local development), every request
//! resolves to a fixed development user and the flow endpoints are refused.

pub mod cookie;
pub mod middleware;
pub mod routes;

use crate::config::{CookieConfig, ServerConfig};
use gatehouse_identity::AuthService;

pub use middleware::CurrentUser;
pub use routes::{get_session, login, logout, register};

/// Shared application state.
pub struct AppState {
    /// Identity provider operations.
    pub auth_service: AuthService,
    /// Whether authentication is enabled.
    pub auth_enabled: bool,
    /// Session cookie attributes.
    pub cookie: CookieConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(auth_service: AuthService, auth_enabled: bool, cookie: CookieConfig) -> Self {
        Self {
            auth_service,
            auth_enabled,
            cookie,
        }
    }

    /// Creates the state described by a server configuration.
    pub fn from_config(auth_service: AuthService, config: &ServerConfig) -> Self {
        Self::new(auth_service, config.auth_enabled(), config.cookie.clone())
    }
}
