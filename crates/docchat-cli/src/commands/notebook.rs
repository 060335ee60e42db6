use super::with_progress;
use crate::bootstrap::AppContext;
use crate::picker::pick_pdf;
use crate::render;
use anyhow::{Result, anyhow};
use colored::Colorize;
use docchat_core::notebook::Notebook;
use std::path::Path;

const MIN_ID_PREFIX: usize = 4;

/// Finds a notebook by 1-based list position, full id, or unique id prefix.
pub fn resolve(notebooks: &[Notebook], key: &str) -> Result<Notebook> {
    let key = key.trim();
    if let Ok(position) = key.parse::<usize>() {
        if let Some(notebook) = position.checked_sub(1).and_then(|i| notebooks.get(i)) {
            return Ok(notebook.clone());
        }
    }
    if let Some(notebook) = notebooks.iter().find(|notebook| notebook.id == key) {
        return Ok(notebook.clone());
    }

    let mut matches = notebooks
        .iter()
        .filter(|notebook| key.len() >= MIN_ID_PREFIX && notebook.id.starts_with(key));
    match (matches.next(), matches.next()) {
        (Some(notebook), None) => Ok(notebook.clone()),
        (Some(_), Some(_)) => Err(anyhow!("'{}' matches more than one notebook", key)),
        _ => Err(anyhow!("No notebook matches '{}'", key)),
    }
}

pub async fn list(ctx: &AppContext) -> Result<()> {
    render::print_notebooks(&ctx.notebooks.list().await);
    Ok(())
}

pub async fn create(ctx: &AppContext, file: &Path, name: Option<&str>) -> Result<Notebook> {
    let file = pick_pdf(file)?;
    let notebook = with_progress(&ctx.upload, ctx.notebooks.create(name, &file)).await?;
    println!(
        "{} '{}' ({} chunks)",
        "Created notebook".bright_green(),
        notebook.name,
        notebook.num_chunks
    );
    Ok(notebook)
}

/// Deletes the notebook `key` names once `confirm` agrees.
pub async fn delete(
    ctx: &AppContext,
    key: &str,
    confirm: impl FnOnce(&Notebook) -> Result<bool>,
) -> Result<()> {
    let notebook = resolve(&ctx.notebooks.list().await, key)?;
    if !confirm(&notebook)? {
        println!("{}", "Cancelled.".bright_black());
        return Ok(());
    }
    ctx.notebooks.delete(&notebook.id).await?;
    println!("{} '{}'", "Deleted notebook".bright_green(), notebook.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::api::UploadResponse;

    fn notebook(session_id: &str) -> Notebook {
        Notebook::from_upload(
            session_id,
            &UploadResponse {
                success: true,
                message: String::new(),
                session_id: session_id.to_string(),
                filename: "a.pdf".to_string(),
                num_chunks: 1,
                processing_time: 0.0,
            },
        )
    }

    #[test]
    fn test_resolve_by_position_id_and_prefix() {
        let notebooks = vec![notebook("s1"), notebook("s2")];

        assert_eq!(resolve(&notebooks, "2").unwrap().id, notebooks[1].id);
        assert_eq!(
            resolve(&notebooks, &notebooks[0].id).unwrap().id,
            notebooks[0].id
        );
        assert_eq!(
            resolve(&notebooks, &notebooks[1].id[..12]).unwrap().id,
            notebooks[1].id
        );
    }

    #[test]
    fn test_resolve_unknown() {
        let notebooks = vec![notebook("s1")];
        assert!(resolve(&notebooks, "5").is_err());
        assert!(resolve(&notebooks, "zzz").is_err());
        assert!(resolve(&notebooks, "").is_err());
    }
}
