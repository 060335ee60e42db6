use crate::bootstrap::AppContext;
use crate::render;
use anyhow::Result;
use colored::Colorize;

pub async fn status(ctx: &AppContext) -> Result<()> {
    let state = ctx.session.current().await;
    render::print_session(&state);
    if let Some(id) = state.active_session_id() {
        println!("{}", format!("Session: {}", id).bright_black());
    }

    if let Some(remote) = ctx.session.remote_status().await? {
        println!(
            "Server: {} (created {}, last activity {})",
            if remote.has_pdf {
                "document indexed".green()
            } else {
                "no document".yellow()
            },
            remote.created_at,
            remote.last_activity
        );
    }
    Ok(())
}

pub async fn clear(ctx: &AppContext, remote: bool) -> Result<()> {
    ctx.session.clear(remote).await?;
    println!("{}", "Session cleared.".bright_green());
    Ok(())
}

pub async fn health(ctx: &AppContext) -> Result<()> {
    let health = ctx.session.health().await?;
    println!(
        "{} {} (version {})",
        "Backend:".bold(),
        health.status.bright_green(),
        health.version
    );
    let mut services: Vec<_> = health.services.iter().collect();
    services.sort();
    for (name, status) in services {
        println!("  {}: {}", name, status);
    }
    Ok(())
}
