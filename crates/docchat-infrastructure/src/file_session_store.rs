//! File-backed session store.
//!
//! Keeps the active session in a JSON slot (`session.json`) so it survives
//! restarts.

use crate::paths::DocchatPaths;
use crate::storage::AtomicFile;
use async_trait::async_trait;
use docchat_core::error::{DocchatError, Result};
use docchat_core::session::{SessionState, SessionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Session store persisted to a single JSON file.
///
/// Reads are served from an in-memory cache; every change is written through
/// to disk and published to subscribers.
#[derive(Clone)]
pub struct FileSessionStore {
    state: Arc<Mutex<SessionState>>,
    file: Arc<AtomicFile<SessionState>>,
    notifier: Arc<watch::Sender<SessionState>>,
}

impl FileSessionStore {
    /// Creates a store for `path` without touching the disk.
    pub fn new(path: PathBuf) -> Self {
        let (notifier, _) = watch::channel(SessionState::default());
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            file: Arc::new(AtomicFile::json(path)),
            notifier: Arc::new(notifier),
        }
    }

    /// Creates a store for `path` and rehydrates it.
    pub async fn open(path: PathBuf) -> Result<Self> {
        let store = Self::new(path);
        store.load().await?;
        Ok(store)
    }

    /// Opens the store at the default location (`<config dir>/session.json`).
    pub async fn default_location(paths: &DocchatPaths) -> Result<Self> {
        Self::open(paths.session_file()?).await
    }

    async fn replace_cached(&self, state: SessionState) {
        let mut cached = self.state.lock().await;
        *cached = state.clone();
        drop(cached);
        self.notifier.send_replace(state);
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<SessionState> {
        let file = self.file.clone();
        let loaded = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| DocchatError::internal(format!("Failed to join task: {}", e)))?;

        let state = match loaded {
            Ok(Some(state)) => state,
            Ok(None) => SessionState::default(),
            Err(e) => {
                tracing::warn!(
                    "[FileSessionStore] Discarding unreadable session slot {:?}: {}",
                    self.file.path(),
                    e
                );
                SessionState::default()
            }
        };

        self.replace_cached(state.clone()).await;
        Ok(state)
    }

    async fn save(&self, state: SessionState) -> Result<()> {
        // Cache and subscribers only move once the slot is on disk.
        let file = self.file.clone();
        let to_write = state.clone();
        tokio::task::spawn_blocking(move || file.save(&to_write))
            .await
            .map_err(|e| DocchatError::internal(format!("Failed to join task: {}", e)))?
            .map_err(|e| {
                tracing::error!("[FileSessionStore] Failed to save session slot: {}", e);
                DocchatError::from(e)
            })?;

        self.replace_cached(state).await;
        Ok(())
    }

    async fn get(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.notifier.subscribe()
    }
}
