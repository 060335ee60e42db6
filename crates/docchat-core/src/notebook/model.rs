//! Notebook domain model.

use super::message::Message;
use crate::api::UploadResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client-side notebook: one uploaded document plus its conversation.
///
/// The notebook owns its message list and its own backend session reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    /// Client-generated unique id (UUID v4)
    pub id: String,
    pub name: String,
    pub pdf_filename: String,
    pub session_id: String,
    pub num_chunks: u32,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    /// Transcript in insertion order
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Notebook {
    /// Builds a fresh notebook around a successful upload.
    pub fn from_upload(name: impl Into<String>, upload: &UploadResponse) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            pdf_filename: upload.filename.clone(),
            session_id: upload.session_id.clone(),
            num_chunks: upload.num_chunks,
            created_at: now,
            last_accessed: now,
            messages: Vec::new(),
        }
    }

    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }
}

/// Suggested notebook name for a file: the filename without its `.pdf`.
pub fn default_notebook_name(filename: &str) -> String {
    let trimmed = filename.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.ends_with(".pdf") && trimmed.len() > 4 {
        trimmed[..trimmed.len() - 4].to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> UploadResponse {
        UploadResponse {
            success: true,
            message: "PDF processed successfully".to_string(),
            session_id: "s1".to_string(),
            filename: "a.pdf".to_string(),
            num_chunks: 7,
            processing_time: 0.4,
        }
    }

    #[test]
    fn test_from_upload() {
        let notebook = Notebook::from_upload("Paper", &upload());
        assert_eq!(notebook.name, "Paper");
        assert_eq!(notebook.session_id, "s1");
        assert_eq!(notebook.pdf_filename, "a.pdf");
        assert_eq!(notebook.num_chunks, 7);
        assert!(notebook.messages.is_empty());
        assert_eq!(notebook.created_at, notebook.last_accessed);
        assert!(Uuid::parse_str(&notebook.id).is_ok());
    }

    #[test]
    fn test_default_notebook_name() {
        assert_eq!(default_notebook_name("report.pdf"), "report");
        assert_eq!(default_notebook_name("Q3 Results.PDF"), "Q3 Results");
        assert_eq!(default_notebook_name("notes"), "notes");
        assert_eq!(default_notebook_name(".pdf"), ".pdf");
    }

    #[test]
    fn test_dates_rehydrate() {
        let notebook = Notebook::from_upload("Paper", &upload());
        let json = serde_json::to_string(&notebook).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"lastAccessed\""));

        let restored: Notebook = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, notebook);
    }
}
