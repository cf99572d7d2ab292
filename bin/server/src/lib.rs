//! gatehouse web server.
//!
//! A backend-for-frontend that fronts the identity provider for a single-page
//! application: the browser only ever sees an httpOnly session cookie, and
//! this server drives the provider's login and registration flows on its
//! behalf.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod items;

pub use app::build_router;
