//! Session domain module.
//!
//! A session is the backend-assigned handle that ties an uploaded document
//! to the questions asked about it. Exactly one session is active at a time.
//!
//! # Module Structure
//!
//! - `model`: the persisted session fields (`SessionState`)
//! - `store`: the `SessionStore` trait with load/save lifecycle hooks

mod model;
mod store;

pub use model::SessionState;
pub use store::SessionStore;
