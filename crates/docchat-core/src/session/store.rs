//! Session store trait.

use super::model::SessionState;
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// Durable holder of the active [`SessionState`].
///
/// Backends (file, memory, ...) can be swapped without touching the flows.
/// Subscribers are notified through a `watch` channel whenever the state
/// changes.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Rehydrates the state from the backing store.
    ///
    /// Unreadable or malformed data must be treated as the empty state.
    async fn load(&self) -> Result<SessionState>;

    /// Writes the given state through to the backing store.
    async fn save(&self, state: SessionState) -> Result<()>;

    /// Returns the current in-memory state.
    async fn get(&self) -> SessionState;

    /// Overwrites all three fields at once. No validation is performed.
    async fn set_session(
        &self,
        session_id: String,
        pdf_filename: String,
        num_chunks: u32,
    ) -> Result<()> {
        self.save(SessionState::loaded(session_id, pdf_filename, num_chunks))
            .await
    }

    /// Resets all three fields to empty.
    async fn clear_session(&self) -> Result<()> {
        self.save(SessionState::default()).await
    }

    /// Receives every state change.
    fn subscribe(&self) -> watch::Receiver<SessionState>;
}
