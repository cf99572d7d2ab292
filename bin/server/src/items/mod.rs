//! Sample CRUD routes over a MongoDB `items` collection.
//!
//! Mounted under `/api` only when `MONGO__URI` is configured. Documents are
//! free-form JSON objects; the only logic is id validation and the
//! `_id` → `id` rewrite on the way out.

pub mod routes;
pub mod store;

pub use routes::router;
pub use store::ItemStore;
