//! Active-session queries that go beyond the local store.

use docchat_core::api::{ApiClient, HealthResponse, SessionStatusResponse};
use docchat_core::error::Result;
use docchat_core::session::{SessionState, SessionStore};
use std::sync::Arc;

pub struct SessionService {
    api: Arc<dyn ApiClient>,
    session_store: Arc<dyn SessionStore>,
}

impl SessionService {
    pub fn new(api: Arc<dyn ApiClient>, session_store: Arc<dyn SessionStore>) -> Self {
        Self { api, session_store }
    }

    pub async fn current(&self) -> SessionState {
        self.session_store.get().await
    }

    /// Server-side view of the active session, or `None` when nothing is loaded.
    pub async fn remote_status(&self) -> Result<Option<SessionStatusResponse>> {
        let state = self.session_store.get().await;
        let Some(session_id) = state.active_session_id() else {
            return Ok(None);
        };
        let status = self.api.get_status(session_id).await?;
        Ok(Some(status))
    }

    /// Forgets the active session locally, and on the server when `remote`.
    ///
    /// The local slot is cleared even if the server call fails.
    pub async fn clear(&self, remote: bool) -> Result<()> {
        let state = self.session_store.get().await;
        self.session_store.clear_session().await?;
        tracing::info!("[SessionService] Local session cleared");

        if remote {
            if let Some(session_id) = state.active_session_id() {
                let response = self.api.clear_session(session_id).await?;
                tracing::info!("[SessionService] {}", response.message);
            }
        }
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        Ok(self.api.health().await?)
    }
}
