//! Backend API contract.
//!
//! # Module Structure
//!
//! - `dto`: request/response bodies of the `/api/v1` endpoints
//! - `error`: the uniform error shape every failure is normalized into
//! - `client`: the `ApiClient` trait the flows depend on

mod client;
mod dto;
mod error;

pub use client::{ApiClient, ProgressCallback};
pub use dto::{
    HealthResponse, QueryMetadata, QueryRequest, QueryResponse, SessionClearResponse,
    SessionStatusResponse, UploadResponse,
};
pub use error::{ApiError, error_codes};

// Citation types are shared with the chat transcript.
pub use crate::notebook::{AnswerSource, WebSource};
