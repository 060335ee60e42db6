//! Notebook domain module.
//!
//! A notebook groups one document session with its chat transcript. Notebooks
//! live on the client only; the backend knows nothing about them.
//!
//! # Module Structure
//!
//! - `message`: chat transcript entries (`Message`, `MessageKind`) and citations
//! - `model`: the `Notebook` entity
//! - `repository`: the `NotebookRepository` trait

mod message;
mod model;
mod repository;

pub use message::{AnswerSource, Message, MessageKind, WebSource};
pub use model::{Notebook, default_notebook_name};
pub use repository::NotebookRepository;
