//! Self-service flows: typed payloads and submission outcomes.
//!
//! A flow is created by one GET and consumed by exactly one submit. Nothing
//! about it is kept locally beyond the single request that drives it.

use chrono::{DateTime, Utc};
use gatehouse_core::{FlowId, SessionToken};
use serde::Deserialize;

use crate::session::{Identity, Session};
use crate::user::User;

/// Separator used when joining provider messages into one error text.
pub const MESSAGE_SEPARATOR: &str = "; ";

/// The kind of self-service flow being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Login,
    Registration,
}

impl FlowKind {
    /// Path that creates a new API flow of this kind.
    #[must_use]
    pub const fn init_path(self) -> &'static str {
        match self {
            Self::Login => "/self-service/login/api",
            Self::Registration => "/self-service/registration/api",
        }
    }

    /// Path that a flow of this kind is submitted to (with `?flow=<id>`).
    #[must_use]
    pub const fn submit_path(self) -> &'static str {
        match self {
            Self::Login => "/self-service/login",
            Self::Registration => "/self-service/registration",
        }
    }

    /// Text used for a rejection that carried no provider messages.
    #[must_use]
    pub const fn default_rejection(self) -> &'static str {
        match self {
            Self::Login => "Invalid credentials",
            Self::Registration => "Registration failed",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Registration => "registration",
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-progress flow as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Flow {
    id: FlowId,
    #[serde(default, rename = "type")]
    flow_type: Option<String>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    ui: FlowUi,
}

impl Flow {
    #[must_use]
    pub fn id(&self) -> &FlowId {
        &self.id
    }

    /// Returns the flow type reported by the provider (`"api"` for these flows).
    #[must_use]
    pub fn flow_type(&self) -> Option<&str> {
        self.flow_type.as_deref()
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    #[must_use]
    pub fn ui(&self) -> &FlowUi {
        &self.ui
    }
}

/// The `ui` container of a flow, holding validation messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlowUi {
    #[serde(default)]
    messages: Vec<UiText>,
    #[serde(default)]
    nodes: Vec<UiNode>,
}

/// A single form node; only its messages are of interest here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiNode {
    #[serde(default)]
    messages: Vec<UiText>,
}

/// A provider message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiText {
    #[serde(default)]
    text: String,
}

impl UiText {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl FlowUi {
    /// All messages in encounter order: top-level first, then per node.
    pub fn messages(&self) -> impl Iterator<Item = &UiText> {
        self.messages
            .iter()
            .chain(self.nodes.iter().flat_map(|node| node.messages.iter()))
    }

    /// Joins every message text with `"; "`, or returns `default` when the
    /// joined text is empty.
    #[must_use]
    pub fn rejection_text(&self, default: &str) -> String {
        let joined = self
            .messages()
            .map(UiText::text)
            .collect::<Vec<_>>()
            .join(MESSAGE_SEPARATOR);

        if joined.is_empty() {
            default.to_string()
        } else {
            joined
        }
    }
}

/// Body of a rejected (HTTP 400) submission: the flow re-rendered with messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RejectedFlow {
    #[serde(default)]
    pub(crate) ui: FlowUi,
}

/// Body of a successful submission.
///
/// Login always carries a session. Registration carries one only when the
/// provider is configured to sign the new identity in; otherwise the
/// identity is returned at the top level.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowCompletion {
    #[serde(default)]
    session_token: Option<String>,
    #[serde(default)]
    session: Option<Session>,
    #[serde(default)]
    identity: Option<Identity>,
}

impl FlowCompletion {
    /// The issued session token; an empty token counts as missing.
    #[must_use]
    pub fn session_token(&self) -> Option<SessionToken> {
        self.session_token
            .clone()
            .and_then(|token| SessionToken::new(token).ok())
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The identity to project: the session's, falling back to the top-level one.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.session
            .as_ref()
            .map(Session::identity)
            .or(self.identity.as_ref())
    }

    /// Projects the completed identity into a [`User`].
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.identity().map(User::from_identity)
    }
}

/// Result of submitting a flow.
#[derive(Debug, Clone)]
pub enum FlowOutcome {
    /// The provider accepted the submission.
    Completed(FlowCompletion),
    /// The provider rejected the submission with the derived message text.
    Rejected(String),
}
