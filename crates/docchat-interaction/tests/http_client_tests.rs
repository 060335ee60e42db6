//! Exercises `HttpApiClient` against a local stand-in backend.

use axum::extract::{Multipart, Path as UrlPath};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use docchat_core::api::{AnswerSource, ApiClient, ProgressCallback, QueryRequest, error_codes};
use docchat_interaction::HttpApiClient;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

async fn upload(mut multipart: Multipart) -> Response {
    let mut file_name = String::new();
    let mut size = 0usize;
    let mut session_id = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().unwrap_or_default().to_string();
                size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            }
            Some("session_id") => session_id = field.text().await.ok(),
            _ => {}
        }
    }

    if !file_name.ends_with(".pdf") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Only PDF files are supported",
                "error_code": "INVALID_FILE_TYPE"
            })),
        )
            .into_response();
    }

    Json(json!({
        "success": true,
        "message": "PDF processed successfully",
        "session_id": session_id.unwrap_or_else(|| "srv-1".to_string()),
        "filename": file_name,
        "num_chunks": size / 10,
        "processing_time": 0.25
    }))
    .into_response()
}

async fn query(Json(request): Json<QueryRequest>) -> Response {
    match request.question.as_str() {
        "detail" => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Session not found"})),
        )
            .into_response(),
        "plain" => (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response(),
        "garbage" => (StatusCode::OK, "this is not json").into_response(),
        "web" => Json(json!({
            "success": true,
            "answer": "From the web.",
            "source": "web",
            "web_sources": [
                {"title": "First", "url": "https://a.example", "snippet": "a"},
                {"title": "Second", "url": "https://b.example", "snippet": "b"}
            ],
            "processing_time": 1.0,
            "metadata": {"model": "test-model"}
        }))
        .into_response(),
        _ => Json(json!({
            "success": true,
            "answer": format!("{} -> {}", request.session_id, request.question),
            "source": "pdf",
            "chunks_used": 3,
            "processing_time": 0.5,
            "metadata": {"model": "test-model", "tokens_used": 42}
        }))
        .into_response(),
    }
}

async fn status(UrlPath(id): UrlPath<String>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "session_id": id,
        "has_pdf": true,
        "pdf_filename": "paper.pdf",
        "num_chunks": 12,
        "created_at": "2026-01-02T03:04:05",
        "last_activity": "2026-01-02T03:10:00"
    }))
}

async fn clear(UrlPath(id): UrlPath<String>) -> Json<serde_json::Value> {
    Json(json!({"success": true, "message": format!("Session {} cleared", id)}))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": "1.0.0",
        "services": {"vector_store": "ok", "llm": "ok"}
    }))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/upload", post(upload))
        .route("/api/v1/query", post(query))
        .route("/api/v1/session/:id", get(status).delete(clear))
        .route("/api/v1/health", get(health));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn write_pdf(dir: &TempDir, name: &str, size: usize) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, vec![b'%'; size]).unwrap();
    path
}

#[tokio::test]
async fn test_upload_streams_file_and_reports_progress() {
    let client = HttpApiClient::new(&spawn_backend().await);
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(&temp_dir, "paper.pdf", 200_000);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let on_progress: ProgressCallback = Arc::new(move |sent, total| {
        recorder.lock().unwrap().push((sent, total));
    });
    let response = client
        .upload(&path, None, Some(on_progress))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.session_id, "srv-1");
    assert_eq!(response.filename, "paper.pdf");
    assert_eq!(response.num_chunks, 20_000);

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[0].0 <= w[1].0));
    assert_eq!(seen.last().copied(), Some((200_000, 200_000)));
}

#[tokio::test]
async fn test_upload_forwards_existing_session_id() {
    let client = HttpApiClient::new(&spawn_backend().await);
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(&temp_dir, "again.pdf", 100);

    let response = client.upload(&path, Some("keep-me"), None).await.unwrap();
    assert_eq!(response.session_id, "keep-me");
}

#[tokio::test]
async fn test_backend_error_body_is_surfaced_unchanged() {
    let client = HttpApiClient::new(&spawn_backend().await);
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(&temp_dir, "notes.txt", 10);

    let err = client.upload(&path, None, None).await.unwrap_err();
    assert_eq!(err.error, "Only PDF files are supported");
    assert_eq!(err.error_code, error_codes::INVALID_FILE_TYPE);
    assert!(!err.success);
}

#[tokio::test]
async fn test_query_round_trip() {
    let client = HttpApiClient::new(&spawn_backend().await);

    let answer = client.query("s1", "What is it?").await.unwrap();
    assert_eq!(answer.answer, "s1 -> What is it?");
    assert_eq!(answer.source, AnswerSource::Pdf);
    assert_eq!(answer.chunks_used, Some(3));
    assert_eq!(answer.metadata.tokens_used, Some(42));

    let web = client.query("s1", "web").await.unwrap();
    assert_eq!(web.source, AnswerSource::Web);
    let titles: Vec<_> = web
        .web_sources
        .unwrap()
        .into_iter()
        .map(|source| source.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_error_normalization_over_the_wire() {
    let client = HttpApiClient::new(&spawn_backend().await);

    let detail = client.query("s1", "detail").await.unwrap_err();
    assert_eq!(detail.error, "Session not found");
    assert_eq!(detail.error_code, "HTTP_404");

    let plain = client.query("s1", "plain").await.unwrap_err();
    assert_eq!(plain.error, "upstream unavailable");
    assert_eq!(plain.error_code, "HTTP_502");

    let garbage = client.query("s1", "garbage").await.unwrap_err();
    assert_eq!(garbage.error_code, error_codes::INVALID_RESPONSE);
}

#[tokio::test]
async fn test_session_status_clear_and_health() {
    let client = HttpApiClient::new(&spawn_backend().await);

    let status = client.get_status("abc").await.unwrap();
    assert_eq!(status.session_id, "abc");
    assert!(status.has_pdf);
    assert_eq!(status.num_chunks, Some(12));

    let cleared = client.clear_session("abc").await.unwrap();
    assert!(cleared.success);
    assert_eq!(cleared.message, "Session abc cleared");

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.services.get("llm").map(String::as_str), Some("ok"));
}

#[tokio::test]
async fn test_session_id_with_reserved_characters_stays_one_segment() {
    let client = HttpApiClient::new(&spawn_backend().await);

    let status = client.get_status("a/b?c#d").await.unwrap();
    assert_eq!(status.session_id, "a/b?c#d");

    let cleared = client.clear_session("a/b").await.unwrap();
    assert_eq!(cleared.message, "Session a/b cleared");
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpApiClient::new(&format!("http://{}", addr));
    let err = client.query("s1", "anyone there?").await.unwrap_err();
    assert_eq!(err.error_code, error_codes::NETWORK_ERROR);
    assert!(!err.error.is_empty());
}

#[tokio::test]
async fn test_missing_file_fails_before_any_request() {
    let client = HttpApiClient::new("http://127.0.0.1:9");
    let err = client
        .upload(std::path::Path::new("/definitely/not/here.pdf"), None, None)
        .await
        .unwrap_err();
    assert_eq!(err.error_code, error_codes::FILE_NOT_FOUND);
}
