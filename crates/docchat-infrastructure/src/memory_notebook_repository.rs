//! In-memory notebook repository.

use async_trait::async_trait;
use docchat_core::error::Result;
use docchat_core::notebook::{Notebook, NotebookRepository};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryNotebookRepository {
    notebooks: Arc<RwLock<Vec<Notebook>>>,
}

impl InMemoryNotebookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotebookRepository for InMemoryNotebookRepository {
    async fn load_all(&self) -> Result<Vec<Notebook>> {
        Ok(self.notebooks.read().await.clone())
    }

    async fn save_all(&self, notebooks: &[Notebook]) -> Result<()> {
        *self.notebooks.write().await = notebooks.to_vec();
        Ok(())
    }
}
