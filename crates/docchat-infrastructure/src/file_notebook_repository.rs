//! JSON-file implementation of [`NotebookRepository`].

use crate::paths::DocchatPaths;
use crate::storage::AtomicFile;
use async_trait::async_trait;
use docchat_core::error::{DocchatError, Result};
use docchat_core::notebook::{Notebook, NotebookRepository};
use std::path::PathBuf;
use std::sync::Arc;

/// Stores the whole notebook list in `notebooks.json`.
#[derive(Clone)]
pub struct FileNotebookRepository {
    file: Arc<AtomicFile<Vec<Notebook>>>,
}

impl FileNotebookRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::json(path)),
        }
    }

    pub fn from_paths(paths: &DocchatPaths) -> Result<Self> {
        Ok(Self::new(paths.notebooks_file()?))
    }
}

#[async_trait]
impl NotebookRepository for FileNotebookRepository {
    async fn load_all(&self) -> Result<Vec<Notebook>> {
        let file = self.file.clone();
        let loaded = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| DocchatError::internal(format!("Failed to join task: {}", e)))?;

        match loaded {
            Ok(notebooks) => Ok(notebooks.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(
                    "[FileNotebookRepository] Failed to parse {:?}, starting with no notebooks: {}",
                    self.file.path(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, notebooks: &[Notebook]) -> Result<()> {
        let file = self.file.clone();
        let notebooks = notebooks.to_vec();
        let count = notebooks.len();
        tokio::task::spawn_blocking(move || file.save(&notebooks))
            .await
            .map_err(|e| DocchatError::internal(format!("Failed to join task: {}", e)))??;

        tracing::debug!("[FileNotebookRepository] Saved {} notebooks", count);
        Ok(())
    }
}
