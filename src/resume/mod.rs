pub mod keywords;

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Pull the plain text out of a PDF résumé.
///
/// Blocking; run it on the blocking pool from async code.
pub fn extract_text(path: &Path) -> Result<String, AppError> {
    let resume_error = |message: String| AppError::Resume {
        path: path.to_path_buf(),
        message,
    };

    let bytes = std::fs::read(path).map_err(|e| resume_error(e.to_string()))?;
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| resume_error(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(resume_error("no text found in document".to_string()));
    }
    tracing::debug!("Extracted {} characters from {}", text.len(), path.display());
    Ok(text)
}

pub async fn extract_text_async(path: PathBuf) -> Result<String, AppError> {
    let display = path.clone();
    tokio::task::spawn_blocking(move || extract_text(&path))
        .await
        .map_err(|e| AppError::Resume {
            path: display,
            message: format!("extraction task failed: {e}"),
        })?
}
