//! Error types for the identity crate.
//!
//! Errors are designed for layered context using rootcause. Every variant
//! describes a failure talking to the identity provider; validation
//! rejections of a submitted flow are not errors (see
//! [`FlowOutcome`](crate::flow::FlowOutcome)).

use std::fmt;

/// Errors from identity provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The HTTP client could not be constructed.
    ClientSetup { reason: String },
    /// The provider could not be reached or the call timed out.
    Unavailable { endpoint: String, reason: String },
    /// The provider answered with an unexpected status code.
    UpstreamStatus { endpoint: String, status: u16 },
    /// The provider answered with a body that does not match the expected shape.
    InvalidPayload { endpoint: String, reason: String },
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientSetup { reason } => {
                write!(f, "failed to build identity provider client: {reason}")
            }
            Self::Unavailable { endpoint, reason } => {
                write!(f, "identity provider unreachable at {endpoint}: {reason}")
            }
            Self::UpstreamStatus { endpoint, status } => {
                write!(f, "identity provider returned status {status} for {endpoint}")
            }
            Self::InvalidPayload { endpoint, reason } => {
                write!(f, "invalid identity provider payload from {endpoint}: {reason}")
            }
        }
    }
}

impl std::error::Error for IdentityError {}
