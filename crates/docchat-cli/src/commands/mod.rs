pub mod ask;
pub mod config;
pub mod notebook;
pub mod session;
pub mod upload;

use crate::render;
use docchat_application::UploadService;
use std::future::Future;
use std::io::Write;

/// Draws the upload progress bar on stderr while `operation` runs.
pub async fn with_progress<F: Future>(upload: &UploadService, operation: F) -> F::Output {
    let mut progress = upload.subscribe_progress();
    let bar = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let percent = progress.borrow_and_update().percent;
            eprint!("\r{}", render::progress_bar(percent));
            let _ = std::io::stderr().flush();
        }
    });

    let output = operation.await;
    bar.abort();
    eprintln!("\r{}", render::progress_bar(upload.progress().percent));
    output
}
