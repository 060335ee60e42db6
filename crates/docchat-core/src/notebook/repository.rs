//! Notebook repository trait.

use super::model::Notebook;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the client-side notebook list.
///
/// The list is stored as a whole, newest notebook first, decoupling the
/// notebook use case from the storage mechanism (JSON file, memory, ...).
///
/// # Implementation Notes
///
/// `load_all` must fail open: a missing, empty, or malformed payload yields an
/// empty list rather than an error.
#[async_trait]
pub trait NotebookRepository: Send + Sync {
    /// Loads every stored notebook in stored order.
    async fn load_all(&self) -> Result<Vec<Notebook>>;

    /// Replaces the stored list.
    async fn save_all(&self, notebooks: &[Notebook]) -> Result<()>;

    /// Finds a notebook by its ID.
    async fn find_by_id(&self, notebook_id: &str) -> Result<Option<Notebook>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|notebook| notebook.id == notebook_id))
    }
}
