//! API client trait.

use super::dto::{
    HealthResponse, QueryResponse, SessionClearResponse, SessionStatusResponse, UploadResponse,
};
use super::error::ApiError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Called with `(bytes_sent, total_bytes)` as an upload body is consumed by
/// the transport.
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// An abstract client for the retrieval backend.
///
/// This trait decouples the upload and chat flows from the HTTP stack, so
/// the flows can be driven by a mock in tests.
///
/// # Implementation Notes
///
/// Implementations must normalize every failure into [`ApiError`] and must
/// not retry.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Uploads a document as multipart field `file`.
    ///
    /// `session_id` is forwarded when re-uploading into an existing session.
    async fn upload(
        &self,
        file: &Path,
        session_id: Option<&str>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<UploadResponse, ApiError>;

    /// Asks a question against a session's document.
    async fn query(&self, session_id: &str, question: &str) -> Result<QueryResponse, ApiError>;

    /// Fetches server-side metadata for a session.
    async fn get_status(&self, session_id: &str) -> Result<SessionStatusResponse, ApiError>;

    /// Deletes the server-side session and its document.
    async fn clear_session(&self, session_id: &str) -> Result<SessionClearResponse, ApiError>;

    /// Liveness probe.
    async fn health(&self) -> Result<HealthResponse, ApiError>;
}
