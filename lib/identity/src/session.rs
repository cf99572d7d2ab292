//! Provider sessions and identities.
//!
//! Both types are read-only views of provider-owned records. A session lives
//! only inside the client's cookie (as its token); the server re-fetches it
//! from the provider on every request and never stores it.

use chrono::{DateTime, Utc};
use gatehouse_core::IdentityId;
use serde::Deserialize;

/// A provider session, as returned by `/sessions/whoami` or a completed flow.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    active: Option<bool>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
    identity: Identity,
}

impl Session {
    /// Returns the provider's session id, if reported.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn active(&self) -> Option<bool> {
        self.active
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// A provider identity (user account).
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    id: IdentityId,
    #[serde(default)]
    traits: Traits,
}

impl Identity {
    #[must_use]
    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    #[must_use]
    pub fn traits(&self) -> &Traits {
        &self.traits
    }
}

/// Identity traits as defined by the identity schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Traits {
    #[serde(default)]
    pub email: Option<String>,
    /// A `null` name decodes the same as an absent one.
    #[serde(default)]
    pub name: Option<Name>,
}

/// The optional name trait.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Name {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whoami_payload_decodes() {
        let session: Session = serde_json::from_value(json!({
            "id": "sess-1",
            "active": true,
            "expires_at": "2026-10-19T12:00:00Z",
            "authenticated_at": "2026-10-18T12:00:00Z",
            "identity": {
                "id": "9f5c1e7a-0000-4000-8000-000000000001",
                "schema_id": "default",
                "state": "active",
                "traits": {
                    "email": "ada@example.com",
                    "name": {"first": "Ada", "last": "Lovelace"}
                }
            }
        }))
        .expect("session");

        assert_eq!(session.id(), Some("sess-1"));
        assert_eq!(session.active(), Some(true));
        assert!(session.expires_at().is_some());
        let identity = session.identity();
        assert_eq!(identity.id().as_str(), "9f5c1e7a-0000-4000-8000-000000000001");
        assert_eq!(identity.traits().email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn null_name_decodes_as_absent() {
        let identity: Identity = serde_json::from_value(json!({
            "id": "i-1",
            "traits": {"email": "x@y.z", "name": null}
        }))
        .expect("identity");

        assert!(identity.traits().name.is_none());
    }

    #[test]
    fn missing_traits_default_to_empty() {
        let identity: Identity = serde_json::from_value(json!({"id": "i-2"})).expect("identity");
        assert!(identity.traits().email.is_none());
        assert!(identity.traits().name.is_none());
    }

    #[test]
    fn session_requires_identity() {
        let result: Result<Session, _> = serde_json::from_value(json!({"id": "s"}));
        assert!(result.is_err());
    }
}
