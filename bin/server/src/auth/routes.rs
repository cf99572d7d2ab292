//! Authentication routes for login, registration, session and logout.
//!
//! The frontend never talks to the identity provider directly: these
//! handlers drive the provider's API flows on its behalf and move the
//! resulting session token into an httpOnly cookie.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use gatehouse_identity::{FlowCompletion, FlowOutcome, User};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::{AppState, CurrentUser, cookie};
use crate::error::{ApiError, ApiJson, LOGIN_FAILED, REGISTRATION_FAILED};

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Logs in with an identifier and password.
///
/// Creates a login flow, submits the credentials, and sets the session
/// cookie on success.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<User>), ApiError> {
    if !state.auth_enabled {
        return Err(ApiError::FeatureDisabled);
    }

    let flow = state
        .auth_service
        .create_login_flow()
        .await
        .map_err(|report| ApiError::internal(LOGIN_FAILED, report))?;

    let outcome = state
        .auth_service
        .submit_login_flow(flow.id(), &body.identifier, &body.password)
        .await
        .map_err(|report| ApiError::internal(LOGIN_FAILED, report))?;

    let completion = match outcome {
        FlowOutcome::Completed(completion) => completion,
        FlowOutcome::Rejected(detail) => {
            return Err(ApiError::Rejected {
                status: StatusCode::UNAUTHORIZED,
                detail,
            });
        }
    };

    let (jar, user) = start_session(&state, jar, &completion, LOGIN_FAILED)?;
    tracing::info!(user_id = %user.id, "user logged in");
    Ok((jar, Json(user)))
}

/// Registers a new account.
///
/// Creates a registration flow, submits the data, and sets the session
/// cookie on success so the new user is signed in right away.
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(CookieJar, Json<User>), ApiError> {
    if !state.auth_enabled {
        return Err(ApiError::FeatureDisabled);
    }

    let flow = state
        .auth_service
        .create_registration_flow()
        .await
        .map_err(|report| ApiError::internal(REGISTRATION_FAILED, report))?;

    let outcome = state
        .auth_service
        .submit_registration_flow(
            flow.id(),
            &body.email,
            &body.password,
            Some(body.first_name.as_str()),
            Some(body.last_name.as_str()),
        )
        .await
        .map_err(|report| ApiError::internal(REGISTRATION_FAILED, report))?;

    let completion = match outcome {
        FlowOutcome::Completed(completion) => completion,
        FlowOutcome::Rejected(detail) => {
            return Err(ApiError::Rejected {
                status: StatusCode::BAD_REQUEST,
                detail,
            });
        }
    };

    let (jar, user) = start_session(&state, jar, &completion, REGISTRATION_FAILED)?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok((jar, Json(user)))
}

/// Returns the current user.
pub async fn get_session(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Logs out by removing the session cookie. Always succeeds.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        jar.add(cookie::removal_cookie(&state.cookie)),
        Json(json!({"status": "ok"})),
    )
}

/// Stores the session token in the cookie jar and projects the user.
fn start_session(
    state: &AppState,
    jar: CookieJar,
    completion: &FlowCompletion,
    failure: &'static str,
) -> Result<(CookieJar, User), ApiError> {
    let token = completion
        .session_token()
        .ok_or(ApiError::MissingSessionToken)?;
    let user = completion
        .user()
        .ok_or_else(|| ApiError::internal(failure, "flow completion carried no identity"))?;

    Ok((jar.add(cookie::session_cookie(&state.cookie, &token)), user))
}
