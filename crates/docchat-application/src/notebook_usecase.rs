//! Notebook use case implementation.
//!
//! `NotebookUseCase` coordinates the notebook list, the active session and the
//! chat transcript so that the three never disagree about which document is
//! open.

use crate::chat_service::{ChatService, ChatTarget, SendOutcome};
use crate::upload_service::UploadService;
use docchat_core::error::{DocchatError, Result};
use docchat_core::notebook::{Notebook, NotebookRepository, default_notebook_name};
use docchat_core::session::SessionStore;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Use case for the notebook list and the notebook view.
///
/// # Responsibilities
///
/// - Creating notebooks from uploaded documents (newest first)
/// - Opening a notebook: session store and chat transcript follow it
/// - Writing the transcript back to its notebook after every change
/// - Deleting notebooks, returning to the list when the open one goes
pub struct NotebookUseCase {
    repository: Arc<dyn NotebookRepository>,
    session_store: Arc<dyn SessionStore>,
    upload_service: Arc<UploadService>,
    chat_service: Arc<ChatService>,
    notebooks: RwLock<Vec<Notebook>>,
    selected: RwLock<Option<String>>,
}

impl NotebookUseCase {
    pub fn new(
        repository: Arc<dyn NotebookRepository>,
        session_store: Arc<dyn SessionStore>,
        upload_service: Arc<UploadService>,
        chat_service: Arc<ChatService>,
    ) -> Self {
        Self {
            repository,
            session_store,
            upload_service,
            chat_service,
            notebooks: RwLock::new(Vec::new()),
            selected: RwLock::new(None),
        }
    }

    /// Reads the stored list. Unreadable data yields an empty list.
    pub async fn load(&self) -> Result<usize> {
        let loaded = self.repository.load_all().await?;
        let count = loaded.len();
        *self.notebooks.write().await = loaded;
        tracing::info!("[NotebookUseCase] Loaded {} notebooks", count);
        Ok(count)
    }

    /// All notebooks, newest first.
    pub async fn list(&self) -> Vec<Notebook> {
        self.notebooks.read().await.clone()
    }

    pub async fn find(&self, notebook_id: &str) -> Option<Notebook> {
        self.notebooks
            .read()
            .await
            .iter()
            .find(|notebook| notebook.id == notebook_id)
            .cloned()
    }

    /// The open notebook, if any.
    pub async fn selected(&self) -> Option<Notebook> {
        let selected = self.selected.read().await.clone()?;
        self.find(&selected).await
    }

    /// Uploads `file` and adds a notebook for it at the top of the list.
    ///
    /// `name` defaults to the filename without `.pdf`; it must not be blank.
    /// The upload also makes the new session the active one. The notebook is
    /// not opened.
    pub async fn create(&self, name: Option<&str>, file: &Path) -> Result<Notebook> {
        let name = match name {
            Some(name) => name.trim().to_string(),
            None => file
                .file_name()
                .map(|name| default_notebook_name(&name.to_string_lossy()))
                .unwrap_or_default(),
        };
        if name.is_empty() {
            return Err(DocchatError::invalid_input("Notebook name is required"));
        }

        let response = self.upload_service.upload(file, None).await?;
        let notebook = Notebook::from_upload(name, &response);

        self.commit(|notebooks| {
            notebooks.insert(0, notebook.clone());
            Ok(())
        })
        .await?;
        tracing::info!(
            "[NotebookUseCase] Created notebook '{}' ({})",
            notebook.name,
            notebook.id
        );
        Ok(notebook)
    }

    /// Opens a notebook: bumps `last_accessed`, loads its session and its
    /// transcript.
    pub async fn select(&self, notebook_id: &str) -> Result<Notebook> {
        self.flush_transcript().await?;

        let notebook = self
            .commit(|notebooks| {
                let notebook = notebooks
                    .iter_mut()
                    .find(|notebook| notebook.id == notebook_id)
                    .ok_or_else(|| DocchatError::not_found("Notebook", notebook_id))?;
                notebook.touch();
                Ok(notebook.clone())
            })
            .await?;

        self.session_store
            .set_session(
                notebook.session_id.clone(),
                notebook.pdf_filename.clone(),
                notebook.num_chunks,
            )
            .await?;
        self.chat_service
            .open(
                ChatTarget::Notebook(notebook.id.clone()),
                notebook.messages.clone(),
            )
            .await;
        *self.selected.write().await = Some(notebook.id.clone());

        tracing::info!("[NotebookUseCase] Opened notebook '{}'", notebook.name);
        Ok(notebook)
    }

    /// Closes the open notebook and clears the active session.
    pub async fn back_to_list(&self) -> Result<()> {
        self.flush_transcript().await?;
        self.chat_service.close().await;
        *self.selected.write().await = None;
        self.session_store.clear_session().await?;
        tracing::debug!("[NotebookUseCase] Back to notebook list");
        Ok(())
    }

    /// Removes a notebook and its messages for good.
    pub async fn delete(&self, notebook_id: &str) -> Result<()> {
        self.commit(|notebooks| {
            let before = notebooks.len();
            notebooks.retain(|notebook| notebook.id != notebook_id);
            if notebooks.len() == before {
                return Err(DocchatError::not_found("Notebook", notebook_id));
            }
            Ok(())
        })
        .await?;
        tracing::info!("[NotebookUseCase] Deleted notebook {}", notebook_id);

        let was_open = self.selected.read().await.as_deref() == Some(notebook_id);
        if was_open {
            self.back_to_list().await?;
        }
        Ok(())
    }

    /// Asks a question in the open conversation and stores the transcript.
    pub async fn ask(&self, text: &str) -> Result<SendOutcome> {
        let outcome = self.chat_service.send_message(text).await;
        if outcome != SendOutcome::Ignored {
            self.flush_transcript().await?;
        }
        Ok(outcome)
    }

    /// Empties the open notebook's transcript.
    pub async fn clear_chat(&self) -> Result<()> {
        self.chat_service.clear_messages().await;
        self.flush_transcript().await
    }

    /// Writes the chat transcript into the notebook it belongs to.
    ///
    /// A transcript whose notebook no longer exists is dropped.
    async fn flush_transcript(&self) -> Result<()> {
        let (target, messages) = self.chat_service.snapshot().await;
        let Some(ChatTarget::Notebook(notebook_id)) = target else {
            return Ok(());
        };

        let mut notebooks = self.notebooks.write().await;
        let Some(index) = notebooks
            .iter()
            .position(|notebook| notebook.id == notebook_id)
        else {
            tracing::debug!(
                "[NotebookUseCase] Notebook {} is gone; transcript not stored",
                notebook_id
            );
            return Ok(());
        };
        if notebooks[index].messages == messages {
            return Ok(());
        }

        let mut updated = notebooks.clone();
        updated[index].messages = messages;
        updated[index].touch();
        self.repository.save_all(&updated).await?;
        *notebooks = updated;
        Ok(())
    }

    /// Applies `change` to a copy of the list, persists the copy and only then
    /// makes it current. On any error the list is left as it was.
    async fn commit<R>(
        &self,
        change: impl FnOnce(&mut Vec<Notebook>) -> Result<R>,
    ) -> Result<R> {
        let mut notebooks = self.notebooks.write().await;
        let mut updated = notebooks.clone();
        let result = change(&mut updated)?;
        self.repository.save_all(&updated).await?;
        *notebooks = updated;
        Ok(result)
    }
}
