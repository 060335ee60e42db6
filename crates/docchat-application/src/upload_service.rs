//! Upload flow: file → multipart POST → session store.

use docchat_core::api::{ApiClient, ProgressCallback, UploadResponse};
use docchat_core::error::{DocchatError, Result};
use docchat_core::session::SessionStore;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

/// Body bytes never report more than this before the server answers.
const MAX_PERCENT_BEFORE_RESPONSE: u8 = 90;

/// Progress of the current (or last) upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadProgress {
    /// 0..=100
    pub percent: u8,
    pub bytes_sent: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    fn sending(bytes_sent: u64, total_bytes: u64) -> Self {
        let percent = if total_bytes == 0 {
            MAX_PERCENT_BEFORE_RESPONSE
        } else {
            let raw = bytes_sent.saturating_mul(100) / total_bytes;
            raw.min(MAX_PERCENT_BEFORE_RESPONSE as u64) as u8
        };
        Self {
            percent,
            bytes_sent,
            total_bytes,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}

/// Uploads a document and, on success, makes its session the active one.
///
/// Progress is published through a `watch` channel so a front end can draw
/// a bar while the request is in flight.
pub struct UploadService {
    api: Arc<dyn ApiClient>,
    session_store: Arc<dyn SessionStore>,
    progress: Arc<watch::Sender<UploadProgress>>,
}

impl UploadService {
    pub fn new(api: Arc<dyn ApiClient>, session_store: Arc<dyn SessionStore>) -> Self {
        let (progress, _) = watch::channel(UploadProgress::default());
        Self {
            api,
            session_store,
            progress: Arc::new(progress),
        }
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<UploadProgress> {
        self.progress.subscribe()
    }

    pub fn progress(&self) -> UploadProgress {
        *self.progress.borrow()
    }

    /// Posts `file` and stores the returned session.
    ///
    /// On failure progress goes back to 0 and the session store is left as
    /// it was. No retry is attempted.
    pub async fn upload(&self, file: &Path, session_id: Option<&str>) -> Result<UploadResponse> {
        self.progress.send_replace(UploadProgress::default());

        let sender = self.progress.clone();
        let on_progress: ProgressCallback = Arc::new(move |sent, total| {
            sender.send_replace(UploadProgress::sending(sent, total));
        });

        tracing::info!("[UploadService] Uploading {}", file.display());
        let response = match self.api.upload(file, session_id, Some(on_progress)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("[UploadService] Upload of {} failed: {}", file.display(), e);
                self.progress.send_replace(UploadProgress::default());
                return Err(DocchatError::Api(e));
            }
        };

        self.progress.send_modify(|progress| {
            progress.percent = 100;
            progress.bytes_sent = progress.total_bytes;
        });

        self.session_store
            .set_session(
                response.session_id.clone(),
                response.filename.clone(),
                response.num_chunks,
            )
            .await?;

        tracing::info!(
            "[UploadService] {} ready: session={}, chunks={}",
            response.filename,
            response.session_id,
            response.num_chunks
        );
        Ok(response)
    }
}
