use super::with_progress;
use crate::bootstrap::AppContext;
use crate::picker::pick_pdf;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub async fn run(ctx: &AppContext, file: &Path, session_id: Option<&str>) -> Result<()> {
    let file = pick_pdf(file)?;
    let response = with_progress(&ctx.upload, ctx.upload.upload(&file, session_id)).await?;

    println!(
        "{} {} ({} chunks, {:.1}s)",
        "Uploaded".bright_green(),
        response.filename,
        response.num_chunks,
        response.processing_time
    );
    println!("{}", format!("Session: {}", response.session_id).bright_black());
    Ok(())
}
