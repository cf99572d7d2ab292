//! Core types and utilities for gatehouse.
//!
//! This crate provides the opaque identifier types handed out by the
//! identity provider and the shared `Result` alias used by the library
//! crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{FlowId, IdentityId, ParseIdError, SessionToken};
