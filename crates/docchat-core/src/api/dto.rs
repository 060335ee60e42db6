//! Wire types for the retrieval backend.
//!
//! Field names follow the backend's snake_case JSON.

use crate::notebook::{AnswerSource, WebSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body returned by `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub session_id: String,
    pub filename: String,
    pub num_chunks: u32,
    #[serde(default)]
    pub processing_time: f64,
}

/// Body sent to `POST /query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub session_id: String,
    pub question: String,
    /// Always `false`; streamed answers are not supported.
    #[serde(default)]
    pub stream: bool,
}

impl QueryRequest {
    pub fn new(session_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            question: question.into(),
            stream: false,
        }
    }
}

/// Model information attached to an answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryMetadata {
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
}

/// Body returned by `POST /query`.
///
/// `chunks_used` is set for answers drawn from the document, `web_sources`
/// for answers drawn from a web search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    pub answer: String,
    pub source: AnswerSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_used: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_sources: Option<Vec<WebSource>>,
    #[serde(default)]
    pub processing_time: f64,
    #[serde(default)]
    pub metadata: QueryMetadata,
}

/// Body returned by `GET /session/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub success: bool,
    pub session_id: String,
    pub has_pdf: bool,
    #[serde(default)]
    pub pdf_filename: Option<String>,
    #[serde(default)]
    pub num_chunks: Option<u32>,
    pub created_at: String,
    pub last_activity: String,
}

/// Body returned by `DELETE /session/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClearResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: String,
    /// Status of the backend's own upstream services, keyed by name.
    #[serde(default)]
    pub services: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_never_streams() {
        let body = serde_json::to_value(QueryRequest::new("s1", "What is this?")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"session_id": "s1", "question": "What is this?", "stream": false})
        );
    }

    #[test]
    fn test_web_answer_keeps_citation_order() {
        let raw = r#"{
            "success": true,
            "answer": "Rust 1.0 shipped in 2015.",
            "source": "web",
            "web_sources": [
                {"title": "Rust Blog", "url": "https://blog.rust-lang.org", "snippet": "Announcing Rust 1.0"},
                {"title": "Wikipedia", "url": "https://en.wikipedia.org/wiki/Rust", "snippet": "First stable release"}
            ],
            "processing_time": 1.25,
            "metadata": {"model": "gpt-4o-mini"}
        }"#;

        let parsed: QueryResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.source, AnswerSource::Web);
        assert!(parsed.chunks_used.is_none());
        let sources = parsed.web_sources.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "Rust Blog");
        assert_eq!(sources[1].title, "Wikipedia");
        assert_eq!(parsed.metadata.tokens_used, None);
    }

    #[test]
    fn test_session_status_without_pdf() {
        let raw = r#"{
            "success": true,
            "session_id": "abc",
            "has_pdf": false,
            "created_at": "2024-05-01T10:00:00",
            "last_activity": "2024-05-01T10:05:00"
        }"#;

        let parsed: SessionStatusResponse = serde_json::from_str(raw).unwrap();
        assert!(!parsed.has_pdf);
        assert!(parsed.pdf_filename.is_none());
        assert!(parsed.num_chunks.is_none());
    }
}
