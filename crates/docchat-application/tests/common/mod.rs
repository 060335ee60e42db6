//! Shared fixtures: a scripted `ApiClient` and response builders.

#![allow(dead_code)]

use async_trait::async_trait;
use docchat_application::ChatService;
use docchat_core::api::{
    AnswerSource, ApiClient, ApiError, HealthResponse, ProgressCallback, QueryMetadata,
    QueryResponse, SessionClearResponse, SessionStatusResponse, UploadResponse, WebSource,
};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Scripted backend. Query replies are served in order; when a gate is set,
/// every query waits for one `notify_one` before replying.
#[derive(Default)]
pub struct MockApiClient {
    upload_replies: Mutex<VecDeque<Result<UploadResponse, ApiError>>>,
    query_replies: Mutex<VecDeque<Result<QueryResponse, ApiError>>>,
    pub queries: Mutex<Vec<(String, String)>>,
    pub uploads: Mutex<Vec<(String, Option<String>)>>,
    pub cleared: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_upload(&self, reply: Result<UploadResponse, ApiError>) {
        self.upload_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_query(&self, reply: Result<QueryResponse, ApiError>) {
        self.query_replies.lock().unwrap().push_back(reply);
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn upload(
        &self,
        file: &Path,
        session_id: Option<&str>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<UploadResponse, ApiError> {
        self.uploads.lock().unwrap().push((
            file.display().to_string(),
            session_id.map(str::to_string),
        ));
        if let Some(callback) = on_progress {
            callback(50, 100);
            callback(100, 100);
        }
        self.upload_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::network("no scripted upload reply")))
    }

    async fn query(&self, session_id: &str, question: &str) -> Result<QueryResponse, ApiError> {
        self.queries
            .lock()
            .unwrap()
            .push((session_id.to_string(), question.to_string()));
        let reply = self
            .query_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(pdf_answer(&format!("echo: {}", question))));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        reply
    }

    async fn get_status(&self, session_id: &str) -> Result<SessionStatusResponse, ApiError> {
        Ok(SessionStatusResponse {
            success: true,
            session_id: session_id.to_string(),
            has_pdf: true,
            pdf_filename: Some("a.pdf".to_string()),
            num_chunks: Some(7),
            created_at: "2026-01-01T00:00:00".to_string(),
            last_activity: "2026-01-01T00:05:00".to_string(),
        })
    }

    async fn clear_session(&self, session_id: &str) -> Result<SessionClearResponse, ApiError> {
        self.cleared.lock().unwrap().push(session_id.to_string());
        Ok(SessionClearResponse {
            success: true,
            message: format!("Session {} cleared", session_id),
        })
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
            version: "1.0.0".to_string(),
            services: HashMap::new(),
        })
    }
}

pub fn uploaded(session_id: &str, filename: &str, num_chunks: u32) -> UploadResponse {
    UploadResponse {
        success: true,
        message: "PDF processed successfully".to_string(),
        session_id: session_id.to_string(),
        filename: filename.to_string(),
        num_chunks,
        processing_time: 0.1,
    }
}

pub fn pdf_answer(answer: &str) -> QueryResponse {
    QueryResponse {
        success: true,
        answer: answer.to_string(),
        source: AnswerSource::Pdf,
        chunks_used: Some(2),
        web_sources: None,
        processing_time: 0.2,
        metadata: QueryMetadata::default(),
    }
}

pub fn web_answer(answer: &str, sources: &[(&str, &str)]) -> QueryResponse {
    QueryResponse {
        success: true,
        answer: answer.to_string(),
        source: AnswerSource::Web,
        chunks_used: None,
        web_sources: Some(
            sources
                .iter()
                .map(|(title, url)| WebSource {
                    title: title.to_string(),
                    url: url.to_string(),
                    snippet: String::new(),
                })
                .collect(),
        ),
        processing_time: 0.2,
        metadata: QueryMetadata::default(),
    }
}

/// Waits until a question is in flight, failing the test after about a second.
pub async fn wait_until_loading(chat: &ChatService) {
    for _ in 0..200 {
        if chat.is_loading().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("no request became pending in time");
}
