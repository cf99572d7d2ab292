//! Authentication extractor for Axum.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use gatehouse_identity::{AuthService, User};
use std::sync::Arc;

use super::{AppState, cookie};
use crate::error::{ApiError, SESSION_LOOKUP_FAILED};

/// Extractor resolving the user behind the request's session cookie.
///
/// With authentication disabled this is always the fixed development user
/// and the provider is never called.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        resolve_current_user(&app_state, &CookieJar::from_headers(&parts.headers))
            .await
            .map(CurrentUser)
    }
}

/// Resolves the caller from the session cookie in `jar`.
pub async fn resolve_current_user(state: &AppState, jar: &CookieJar) -> Result<User, ApiError> {
    if !state.auth_enabled {
        return Ok(User::mock());
    }

    let token = cookie::session_token(&state.cookie, jar).ok_or(ApiError::NotAuthenticated)?;

    let session = state
        .auth_service
        .validate_session(&token)
        .await
        .map_err(|report| ApiError::internal(SESSION_LOOKUP_FAILED, report))?
        .ok_or(ApiError::InvalidSession)?;

    Ok(AuthService::extract_user(&session))
}
