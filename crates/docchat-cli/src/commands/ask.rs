use crate::bootstrap::AppContext;
use crate::render;
use anyhow::Result;
use docchat_application::SendOutcome;
use docchat_core::api::{ApiError, error_codes};

/// One-shot question against the active session.
pub async fn run(ctx: &AppContext, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("Question is empty");
    }
    match ctx.chat.send_message(question).await {
        SendOutcome::Answered(reply) => {
            render::print_message(&reply);
            Ok(())
        }
        SendOutcome::Ignored => Err(ApiError::new(
            "No PDF loaded. Upload one with `docchat upload <file>` first",
            error_codes::NO_SESSION,
        )
        .into()),
        SendOutcome::Discarded => Ok(()),
    }
}
