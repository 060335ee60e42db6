//! The file argument acts as the file picker: only existing `.pdf` files pass.

use docchat_core::api::{ApiError, error_codes};
use std::path::{Path, PathBuf};

pub fn pick_pdf(path: &Path) -> Result<PathBuf, ApiError> {
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(ApiError::new(
            format!("{} is not a PDF file", path.display()),
            error_codes::INVALID_FILE_TYPE,
        ));
    }
    if !path.is_file() {
        return Err(ApiError::new(
            format!("{} does not exist", path.display()),
            error_codes::FILE_NOT_FOUND,
        ));
    }
    Ok(path.to_path_buf())
}
