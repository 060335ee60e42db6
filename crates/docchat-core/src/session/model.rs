//! Session state model.

use serde::{Deserialize, Serialize};

/// The active document session as the client remembers it.
///
/// All three fields are written together by [`SessionState::loaded`] and
/// reset together by [`SessionState::default`]. A state where only some of
/// them are set counts as "no file loaded".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Server-assigned session id
    #[serde(default)]
    pub session_id: Option<String>,
    /// Filename echoed back by the upload endpoint
    #[serde(default)]
    pub pdf_filename: Option<String>,
    /// Number of chunks the backend split the document into
    #[serde(default)]
    pub num_chunks: Option<u32>,
}

impl SessionState {
    pub fn loaded(
        session_id: impl Into<String>,
        pdf_filename: impl Into<String>,
        num_chunks: u32,
    ) -> Self {
        Self {
            session_id: Some(session_id.into()),
            pdf_filename: Some(pdf_filename.into()),
            num_chunks: Some(num_chunks),
        }
    }

    /// True only when both the session id and the filename are present.
    pub fn is_loaded(&self) -> bool {
        self.session_id.is_some() && self.pdf_filename.is_some()
    }

    /// The session id, if a document is fully loaded.
    pub fn active_session_id(&self) -> Option<&str> {
        if self.is_loaded() {
            self.session_id.as_deref()
        } else {
            None
        }
    }

    /// Chunk count, only meaningful once a file is loaded.
    pub fn chunk_count(&self) -> Option<u32> {
        if self.is_loaded() {
            self.num_chunks
        } else {
            None
        }
    }
}
