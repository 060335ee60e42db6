//! reqwest-backed [`ApiClient`].

use crate::error_mapping::{normalize_http_error, transport_error};
use async_trait::async_trait;
use docchat_core::DocchatError;
use docchat_core::api::{
    ApiClient, ApiError, HealthResponse, ProgressCallback, QueryRequest, QueryResponse,
    SessionClearResponse, SessionStatusResponse, UploadResponse, error_codes,
};
use docchat_core::config::{API_PREFIX, ClientConfig};
use futures::TryStreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response, Url};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio_util::io::ReaderStream;

/// Talks to the backend under `<base_url>/api/v1`.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    api_root: String,
}

impl HttpApiClient {
    /// Creates a client with transport defaults (no timeout).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_root: format!("{}{}", base_url.trim_end_matches('/'), API_PREFIX),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, DocchatError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| DocchatError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_root: config.api_root(),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    /// `<api_root>/session/<id>` with the id encoded as a single path segment.
    fn session_url(&self, session_id: &str) -> Result<Url, ApiError> {
        let invalid = || ApiError::network(format!("Invalid backend URL {}", self.api_root));
        let mut url = Url::parse(&self.api_root).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("session")
            .push(session_id);
        Ok(url)
    }

    async fn file_part(
        path: &Path,
        on_progress: Option<ProgressCallback>,
    ) -> Result<Part, ApiError> {
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            ApiError::new(
                format!("Cannot open {}: {}", path.display(), e),
                error_codes::FILE_NOT_FOUND,
            )
        })?;
        let total = file
            .metadata()
            .await
            .map_err(|e| {
                ApiError::new(
                    format!("Cannot read {}: {}", path.display(), e),
                    error_codes::FILE_NOT_FOUND,
                )
            })?
            .len();

        let sent = Arc::new(AtomicU64::new(0));
        let stream = ReaderStream::new(file).inspect_ok(move |chunk| {
            let so_far = sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
            if let Some(callback) = &on_progress {
                callback(so_far, total);
            }
        });

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        Part::stream_with_length(Body::wrap_stream(stream), total)
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .map_err(transport_error)
    }
}

/// Decodes a 2xx body or normalizes the failure.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let err = normalize_http_error(status, &body);
        tracing::debug!("[HttpApiClient] {} -> {}", status, err);
        return Err(err);
    }

    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        ApiError::invalid_response(format!("Unexpected response from server: {}", e))
    })
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn upload(
        &self,
        file: &Path,
        session_id: Option<&str>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<UploadResponse, ApiError> {
        let part = Self::file_part(file, on_progress).await?;
        let mut form = Form::new().part("file", part);
        if let Some(session_id) = session_id {
            form = form.text("session_id", session_id.to_string());
        }

        tracing::debug!("[HttpApiClient] POST /upload {}", file.display());
        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn query(&self, session_id: &str, question: &str) -> Result<QueryResponse, ApiError> {
        let request = QueryRequest::new(session_id, question);
        tracing::debug!("[HttpApiClient] POST /query session={}", session_id);
        let response = self
            .client
            .post(self.url("/query"))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn get_status(&self, session_id: &str) -> Result<SessionStatusResponse, ApiError> {
        let response = self
            .client
            .get(self.session_url(session_id)?)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn clear_session(&self, session_id: &str) -> Result<SessionClearResponse, ApiError> {
        let response = self
            .client
            .delete(self.session_url(session_id)?)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}
