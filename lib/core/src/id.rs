//! Strongly-typed identifiers issued by the identity provider.
//!
//! The provider owns every identifier this system sees. They are opaque
//! strings: the only local validation is that they are non-empty, which is
//! enforced whenever one is decoded from a provider payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

fn require_non_empty(id_type: &'static str, value: String) -> Result<String, ParseIdError> {
    if value.trim().is_empty() {
        return Err(ParseIdError {
            id_type,
            reason: "value is empty".to_string(),
        });
    }
    Ok(value)
}

/// Macro to generate a strongly-typed wrapper around a provider-issued string.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wraps a provider-issued value, rejecting empty strings.
            ///
            /// # Errors
            ///
            /// Returns an error if the value is empty or whitespace.
            pub fn new(value: impl Into<String>) -> Result<Self, ParseIdError> {
                require_non_empty(stringify!($name), value.into()).map(Self)
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of an in-progress login or registration flow.
    FlowId
);

define_id!(
    /// Stable identifier of a provider identity (user account).
    IdentityId
);

/// Opaque session token issued by the provider on a completed flow.
///
/// `Debug` output is redacted and there is no `Display` implementation;
/// use [`SessionToken::expose`] where the raw value is required.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a provider-issued token, rejecting empty strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseIdError> {
        require_non_empty("SessionToken", value.into()).map(Self)
    }

    /// Returns the raw token, e.g. for a cookie value or request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

impl TryFrom<String> for SessionToken {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_id_accepts_opaque_value() {
        let id: FlowId = "3f1b2c9e-flow".parse().expect("should parse");
        assert_eq!(id.as_str(), "3f1b2c9e-flow");
        assert_eq!(id.to_string(), "3f1b2c9e-flow");
    }

    #[test]
    fn empty_ids_are_rejected() {
        let err = FlowId::new("").expect_err("empty should fail");
        assert_eq!(err.id_type, "FlowId");

        assert!(IdentityId::new("   ").is_err());
        assert!(SessionToken::new("").is_err());
    }

    #[test]
    fn ids_decode_transparently() {
        let id: IdentityId = serde_json::from_str("\"ident-1\"").expect("deserialize");
        assert_eq!(id.as_str(), "ident-1");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"ident-1\"");
    }

    #[test]
    fn empty_id_fails_to_decode() {
        let result: Result<FlowId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn session_token_debug_is_redacted() {
        let token = SessionToken::new("ory_st_secret").expect("token");
        assert_eq!(format!("{token:?}"), "SessionToken(***)");
        assert_eq!(token.expose(), "ory_st_secret");
    }
}
