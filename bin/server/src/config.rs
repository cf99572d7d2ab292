//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables. Nested keys use
//! `__` as separator, e.g. `AUTH__ENABLED=true` or `COOKIE__SAMESITE=strict`.
//!
//! See [`IdentityConfig`](gatehouse_identity::IdentityConfig) for the
//! identity provider settings (`KRATOS__PUBLIC_URL`, `KRATOS__TIMEOUT_SECONDS`).

use axum_extra::extract::cookie::SameSite;
use gatehouse_identity::IdentityConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration composed from library configs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding the built frontend (`index.html` + `assets/`).
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Authentication feature flag.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Identity provider configuration.
    #[serde(default)]
    pub kratos: IdentityConfig,

    /// Session cookie attributes.
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Document store; the items routes are mounted only when it carries a URI.
    #[serde(default)]
    pub mongo: Option<MongoConfig>,
}

/// Authentication settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// When false, every request resolves to the fixed development user and
    /// login/registration are refused.
    #[serde(default)]
    pub enabled: bool,
}

/// Session cookie attributes, shared by the code that sets the cookie and
/// the code that removes it. The cookie is always httpOnly.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    #[serde(default = "default_cookie_name")]
    pub name: String,

    /// Whether to set the Secure flag on the cookie (requires HTTPS).
    #[serde(default)]
    pub secure: bool,

    /// Same-site policy: `lax`, `strict` or `none`. Unknown values mean `lax`.
    #[serde(default = "default_same_site")]
    pub samesite: String,

    #[serde(default = "default_cookie_path")]
    pub path: String,
}

/// MongoDB connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    /// Connection string. Credentials and database may be set without it,
    /// in which case the store stays disabled.
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_same_site() -> String {
    "lax".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_database() -> String {
    "gatehouse".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
            auth: AuthConfig::default(),
            kratos: IdentityConfig::default(),
            cookie: CookieConfig::default(),
            mongo: None,
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            secure: false,
            samesite: default_same_site(),
            path: default_cookie_path(),
        }
    }
}

impl CookieConfig {
    /// Returns the configured same-site policy.
    #[must_use]
    pub fn same_site(&self) -> SameSite {
        match self.samesite.to_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => SameSite::Lax,
        }
    }
}

impl MongoConfig {
    /// Returns the connection string, if one is set.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref().filter(|u| !u.is_empty())
    }

    /// Returns the credentials when both username and password are set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::default())
    }

    /// Loads configuration from an explicit `config` environment source.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is present but invalid.
    pub fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the connection string and settings for the items store, or
    /// `None` when no `MONGO__URI` is configured.
    #[must_use]
    pub fn items_store(&self) -> Option<(&str, &MongoConfig)> {
        let mongo = self.mongo.as_ref()?;
        Some((mongo.uri()?, mongo))
    }

    /// Whether the authentication feature is enabled.
    #[must_use]
    pub fn auth_enabled(&self) -> bool {
        self.auth.enabled
    }
}
