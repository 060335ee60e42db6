//! HTTP transport for the retrieval backend.

pub mod error_mapping;
pub mod http_client;

pub use error_mapping::{normalize_http_error, transport_error};
pub use http_client::HttpApiClient;
