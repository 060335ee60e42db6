//! Domain layer for docchat.
//!
//! Holds the client-side models (session state, notebooks, chat messages),
//! the wire types exchanged with the retrieval backend, and the traits that
//! the infrastructure and interaction crates implement.

pub mod api;
pub mod config;
pub mod error;
pub mod notebook;
pub mod session;

// Re-export common error type
pub use error::DocchatError;
