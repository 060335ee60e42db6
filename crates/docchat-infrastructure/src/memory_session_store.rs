//! In-memory session store for ephemeral runs and tests.

use async_trait::async_trait;
use docchat_core::error::Result;
use docchat_core::session::{SessionState, SessionStore};
use std::sync::Arc;
use tokio::sync::watch;

/// Session store without durability. `load` returns whatever is held.
#[derive(Clone)]
pub struct InMemorySessionStore {
    notifier: Arc<watch::Sender<SessionState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_state(SessionState::default())
    }

    pub fn with_state(state: SessionState) -> Self {
        let (notifier, _) = watch::channel(state);
        Self {
            notifier: Arc::new(notifier),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<SessionState> {
        Ok(self.notifier.borrow().clone())
    }

    async fn save(&self, state: SessionState) -> Result<()> {
        self.notifier.send_replace(state);
        Ok(())
    }

    async fn get(&self) -> SessionState {
        self.notifier.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.notifier.subscribe()
    }
}
