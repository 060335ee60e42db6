pub mod config_service;
pub mod file_notebook_repository;
pub mod file_session_store;
pub mod memory_notebook_repository;
pub mod memory_session_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_notebook_repository::FileNotebookRepository;
pub use crate::file_session_store::FileSessionStore;
pub use crate::memory_notebook_repository::InMemoryNotebookRepository;
pub use crate::memory_session_store::InMemorySessionStore;
