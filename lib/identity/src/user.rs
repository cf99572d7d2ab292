//! The local user projection.
//!
//! A `User` is computed from a provider identity on every request. It is
//! never persisted and never cached.

use serde::{Deserialize, Serialize};

use crate::session::{Identity, Session};

/// Identifier of the fixed development user.
pub const MOCK_USER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// The user shape exposed to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Projects a provider identity. Absent name parts become `""`.
    #[must_use]
    pub fn from_identity(identity: &Identity) -> Self {
        let traits = identity.traits();
        let name = traits.name.clone().unwrap_or_default();

        Self {
            id: identity.id().to_string(),
            email: traits.email.clone(),
            first_name: name.first.unwrap_or_default(),
            last_name: name.last.unwrap_or_default(),
        }
    }

    /// Projects the identity embedded in a session.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self::from_identity(session.identity())
    }

    /// The constant user returned while authentication is disabled.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            id: MOCK_USER_ID.to_string(),
            email: Some("dev@localhost".to_string()),
            first_name: "Dev".to_string(),
            last_name: "User".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(value: serde_json::Value) -> Session {
        serde_json::from_value(value).expect("session")
    }

    #[test]
    fn projects_all_fields() {
        let session = session(json!({
            "identity": {
                "id": "ident-42",
                "traits": {"email": "a@b.com", "name": {"first": "Grace", "last": "Hopper"}}
            }
        }));

        assert_eq!(
            User::from_session(&session),
            User {
                id: "ident-42".to_string(),
                email: Some("a@b.com".to_string()),
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
            }
        );
    }

    #[test]
    fn absent_name_parts_become_empty_strings() {
        let only_first = session(json!({
            "identity": {"id": "i", "traits": {"email": "a@b.com", "name": {"first": "Ada"}}}
        }));
        let user = User::from_session(&only_first);
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "");

        let no_name = session(json!({"identity": {"id": "i", "traits": {"email": "a@b.com"}}}));
        let user = User::from_session(&no_name);
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "");
    }

    #[test]
    fn projection_is_idempotent() {
        let session = session(json!({
            "identity": {"id": "i-7", "traits": {"email": "c@d.com", "name": null}}
        }));
        assert_eq!(User::from_session(&session), User::from_session(&session));
    }

    #[test]
    fn serialized_user_always_has_name_keys() {
        let session = session(json!({"identity": {"id": "i-8", "traits": {}}}));
        let value = serde_json::to_value(User::from_session(&session)).expect("serialize");

        assert_eq!(value["id"], "i-8");
        assert!(value["email"].is_null());
        assert_eq!(value["first_name"], "");
        assert_eq!(value["last_name"], "");
    }

    #[test]
    fn mock_user_is_fixed() {
        let user = User::mock();
        assert_eq!(user.id, MOCK_USER_ID);
        assert_eq!(user.email.as_deref(), Some("dev@localhost"));
        assert_eq!(user.first_name, "Dev");
        assert_eq!(user.last_name, "User");
        assert_eq!(User::mock(), user);
    }
}
