//! Identity provider integration for gatehouse.
//!
//! This crate provides:
//! - An HTTP client for the provider's public API (`IdentityClient`)
//! - Login and registration flow proxying plus session validation (`AuthService`)
//! - Typed provider payloads (`Flow`, `Session`, `Identity`)
//! - The local `User` projection
//!
//! The provider is the only source of truth for authentication state.
//! Nothing here stores sessions or identities.
//!
//! # Example
//!
//! ```no_run
//! use gatehouse_identity::{AuthService, FlowOutcome, IdentityClient, IdentityConfig};
//!
//! # async fn run() -> gatehouse_core::Result<(), gatehouse_identity::IdentityError> {
//! let client = IdentityClient::new(&IdentityConfig::new("http://localhost:4433"))?;
//! let auth = AuthService::new(client);
//!
//! let flow = auth.create_login_flow().await?;
//! match auth.submit_login_flow(flow.id(), "ada@example.com", "secret").await? {
//!     FlowOutcome::Completed(completion) => println!("{:?}", completion.user()),
//!     FlowOutcome::Rejected(reason) => println!("rejected: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod payload;
pub mod service;
pub mod session;
pub mod user;

// Re-export main types at crate root
pub use client::{IdentityClient, ProviderResponse, SESSION_TOKEN_HEADER};
pub use config::IdentityConfig;
pub use error::IdentityError;
pub use flow::{Flow, FlowCompletion, FlowKind, FlowOutcome, FlowUi};
pub use payload::{LoginSubmission, RegistrationSubmission};
pub use service::AuthService;
pub use session::{Identity, Name, Session, Traits};
pub use user::{MOCK_USER_ID, User};
