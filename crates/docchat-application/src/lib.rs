pub mod chat_service;
pub mod notebook_usecase;
pub mod session_service;
pub mod upload_service;

pub use chat_service::{ChatService, ChatTarget, PendingRequest, SendOutcome};
pub use notebook_usecase::NotebookUseCase;
pub use session_service::SessionService;
pub use upload_service::{UploadProgress, UploadService};
