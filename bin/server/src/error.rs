//! Client-facing error responses.
//!
//! Every failure leaving the server is rendered as `{"detail": "..."}` with
//! a status code. Causes that originate inside the server or the provider
//! are logged here and replaced with a fixed, endpoint-specific message.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

pub const AUTH_DISABLED: &str = "Auth is disabled";
pub const NOT_AUTHENTICATED: &str = "Not authenticated";
pub const INVALID_SESSION: &str = "Invalid or expired session";
pub const MISSING_SESSION_TOKEN: &str = "No session token returned";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const SESSION_LOOKUP_FAILED: &str = "Session validation failed";
pub const INVALID_BODY: &str = "Invalid request body";
pub const INVALID_QUERY: &str = "Invalid query parameters";

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Errors returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Login or registration attempted while authentication is disabled.
    FeatureDisabled,
    /// The provider rejected a flow submission; the text comes from the provider.
    Rejected { status: StatusCode, detail: String },
    /// No session cookie on the request.
    NotAuthenticated,
    /// The provider does not recognise the session token.
    InvalidSession,
    /// The provider completed a flow without issuing a session token.
    MissingSessionToken,
    /// Any other failure; `cause` is logged, `detail` is returned.
    Internal {
        detail: &'static str,
        cause: String,
    },
    /// The path segment is not a valid document id.
    InvalidItemId,
    /// No document with the given id.
    ItemNotFound,
    /// The request body cannot be stored as a document.
    InvalidItem { reason: String },
    /// The request body is missing, not JSON, or the wrong shape.
    InvalidBody { status: StatusCode, reason: String },
    /// The query string does not match the expected parameters.
    InvalidQuery { reason: String },
}

impl ApiError {
    /// Wraps an unexpected failure behind a generic message.
    pub fn internal(detail: &'static str, cause: impl fmt::Display) -> Self {
        Self::Internal {
            detail,
            cause: cause.to_string(),
        }
    }

    /// Returns the status code and client-facing message.
    #[must_use]
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            Self::FeatureDisabled => (StatusCode::BAD_REQUEST, AUTH_DISABLED.to_string()),
            Self::Rejected { status, detail } => (*status, detail.clone()),
            Self::NotAuthenticated => (StatusCode::UNAUTHORIZED, NOT_AUTHENTICATED.to_string()),
            Self::InvalidSession => (StatusCode::UNAUTHORIZED, INVALID_SESSION.to_string()),
            Self::MissingSessionToken => (
                StatusCode::INTERNAL_SERVER_ERROR,
                MISSING_SESSION_TOKEN.to_string(),
            ),
            Self::Internal { detail, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, (*detail).to_string())
            }
            Self::InvalidItemId => (StatusCode::BAD_REQUEST, "Invalid item ID".to_string()),
            Self::ItemNotFound => (StatusCode::NOT_FOUND, "Item not found".to_string()),
            Self::InvalidItem { .. } => (StatusCode::BAD_REQUEST, "Invalid item".to_string()),
            Self::InvalidBody { status, .. } => (*status, INVALID_BODY.to_string()),
            Self::InvalidQuery { .. } => (StatusCode::BAD_REQUEST, INVALID_QUERY.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal { detail, cause } => write!(f, "{detail}: {cause}"),
            Self::InvalidItem { reason } => write!(f, "invalid item: {reason}"),
            Self::InvalidBody { reason, .. } => write!(f, "invalid request body: {reason}"),
            Self::InvalidQuery { reason } => write!(f, "invalid query: {reason}"),
            other => {
                let (status, detail) = other.status_and_detail();
                write!(f, "{status}: {detail}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal { detail, cause } => {
                tracing::error!(%cause, "{}", detail);
            }
            Self::MissingSessionToken => {
                tracing::error!("identity provider completed a flow without a session token");
            }
            Self::InvalidItem { reason } => {
                tracing::debug!(%reason, "rejected item body");
            }
            Self::InvalidBody { reason, .. } => {
                tracing::debug!(%reason, "rejected request body");
            }
            Self::InvalidQuery { reason } => {
                tracing::debug!(%reason, "rejected query string");
            }
            _ => {}
        }

        let (status, detail) = self.status_and_detail();
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery {
            reason: rejection.body_text(),
        }
    }
}

/// JSON body extractor whose rejection is an [`ApiError`].
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string extractor whose rejection is an [`ApiError`].
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_hides_cause() {
        let err = ApiError::internal(LOGIN_FAILED, "connection refused");
        let (status, detail) = err.status_and_detail();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "Login failed");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn rejected_error_keeps_provider_text() {
        let err = ApiError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            detail: "The provided credentials are invalid.".to_string(),
        };
        assert_eq!(
            err.status_and_detail(),
            (
                StatusCode::UNAUTHORIZED,
                "The provided credentials are invalid.".to_string()
            )
        );
    }

    #[test]
    fn unauthenticated_errors_are_401() {
        assert_eq!(
            ApiError::NotAuthenticated.status_and_detail(),
            (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
        );
        assert_eq!(
            ApiError::InvalidSession.status_and_detail(),
            (StatusCode::UNAUTHORIZED, "Invalid or expired session".to_string())
        );
    }

    #[test]
    fn feature_disabled_is_bad_request() {
        let response = ApiError::FeatureDisabled.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_body_keeps_rejection_status_but_hides_reason() {
        let err = ApiError::InvalidBody {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            reason: "missing field `password` at line 1 column 18".to_string(),
        };
        assert_eq!(
            err.status_and_detail(),
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid request body".to_string()
            )
        );
    }

    #[derive(Debug, serde::Deserialize)]
    struct Page {
        skip: u64,
    }

    fn parts(uri: &str) -> Parts {
        axum::http::Request::builder()
            .uri(uri)
            .body(())
            .expect("request")
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn query_extractor_parses_valid_query() {
        let Ok(ApiQuery(page)) = ApiQuery::<Page>::from_request_parts(&mut parts("/items?skip=5"), &()).await
        else {
            panic!("valid query should parse");
        };
        assert_eq!(page.skip, 5);
    }

    #[tokio::test]
    async fn query_extractor_rejects_with_detail() {
        let Err(err) =
            ApiQuery::<Page>::from_request_parts(&mut parts("/items?skip=minus-one"), &()).await
        else {
            panic!("non-numeric skip should be rejected");
        };
        assert_eq!(
            err.status_and_detail(),
            (StatusCode::BAD_REQUEST, "Invalid query parameters".to_string())
        );
    }

    #[test]
    fn missing_token_is_server_error() {
        let (status, detail) = ApiError::MissingSessionToken.status_and_detail();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "No session token returned");
    }
}
