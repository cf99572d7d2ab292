//! The session cookie.
//!
//! Setting and removing the cookie both go through [`CookieConfig`], so the
//! name, path, Secure and SameSite attributes always match.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use gatehouse_core::SessionToken;
use time::Duration as TimeDuration;

use crate::config::CookieConfig;

/// Builds the cookie carrying a provider session token.
pub fn session_cookie(config: &CookieConfig, token: &SessionToken) -> Cookie<'static> {
    build(config, token.expose().to_string())
}

/// Builds an expired, empty cookie that makes the browser drop the session.
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = build(config, String::new());
    cookie.set_max_age(TimeDuration::ZERO);
    cookie
}

/// Reads the session token from the request cookies, if any.
pub fn session_token(config: &CookieConfig, jar: &CookieJar) -> Option<SessionToken> {
    jar.get(&config.name)
        .and_then(|cookie| SessionToken::new(cookie.value()).ok())
}

fn build(config: &CookieConfig, value: String) -> Cookie<'static> {
    Cookie::build((config.name.clone(), value))
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site())
        .build()
}
