//! Composition root: wires stores, the HTTP client and the use cases.

use anyhow::{Context, Result};
use docchat_application::{ChatService, NotebookUseCase, SessionService, UploadService};
use docchat_core::api::ApiClient;
use docchat_core::config::ClientConfig;
use docchat_core::notebook::NotebookRepository;
use docchat_core::session::SessionStore;
use docchat_infrastructure::paths::DocchatPaths;
use docchat_infrastructure::{
    FileNotebookRepository, FileSessionStore, InMemoryNotebookRepository, InMemorySessionStore,
};
use docchat_interaction::HttpApiClient;
use std::sync::Arc;

pub struct AppContext {
    pub config: ClientConfig,
    pub session_store: Arc<dyn SessionStore>,
    pub upload: Arc<UploadService>,
    pub chat: Arc<ChatService>,
    pub session: SessionService,
    pub notebooks: Arc<NotebookUseCase>,
}

impl AppContext {
    /// Builds every service. `ephemeral` keeps all state in memory.
    pub async fn bootstrap(
        config: ClientConfig,
        paths: &DocchatPaths,
        ephemeral: bool,
    ) -> Result<Self> {
        tracing::info!("[Bootstrap] Backend API at {}", config.api_root());
        let api: Arc<dyn ApiClient> = Arc::new(HttpApiClient::from_config(&config)?);

        let (session_store, repository): (Arc<dyn SessionStore>, Arc<dyn NotebookRepository>) =
            if ephemeral {
                tracing::info!("[Bootstrap] Ephemeral run; nothing is persisted");
                (
                    Arc::new(InMemorySessionStore::new()),
                    Arc::new(InMemoryNotebookRepository::new()),
                )
            } else {
                let store = FileSessionStore::default_location(paths)
                    .await
                    .context("Failed to open session store")?;
                let repository = FileNotebookRepository::from_paths(paths)?;
                (Arc::new(store), Arc::new(repository))
            };

        let upload = Arc::new(UploadService::new(api.clone(), session_store.clone()));
        let chat = Arc::new(ChatService::new(api.clone(), session_store.clone()));
        let session = SessionService::new(api.clone(), session_store.clone());
        let notebooks = Arc::new(NotebookUseCase::new(
            repository,
            session_store.clone(),
            upload.clone(),
            chat.clone(),
        ));
        notebooks.load().await?;

        tracing::info!("[Bootstrap] Ready");
        Ok(Self {
            config,
            session_store,
            upload,
            chat,
            session,
            notebooks,
        })
    }
}
