//! Axum route handler for the upload-and-match endpoint.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::matching::models::MatchResponse;
use crate::matching::pipeline::match_documents;
use crate::matching::uploads::UploadedFile;
use crate::state::AppState;

/// POST /upload
///
/// Multipart form with file parts `cv` and `jd`. Extracts both documents, asks the
/// model to match them, and returns the score and skill breakdown.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            warn!("Upload is not a multipart form: {rejection}");
            return Err(AppError::MissingInput);
        }
    };

    let mut cv: Option<UploadedFile> = None;
    let mut jd: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .context("Failed to read multipart body")?
    {
        let field_name = field.name().unwrap_or("").to_string();
        // Only parts carrying a filename are files; plain form fields named cv/jd do not count.
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let slot = match field_name.as_str() {
            "cv" => &mut cv,
            "jd" => &mut jd,
            _ => continue,
        };
        let data = field
            .bytes()
            .await
            .with_context(|| format!("Failed to read '{field_name}' part"))?;
        debug!("Received {field_name} upload '{original_name}' ({} bytes)", data.len());
        *slot = Some(UploadedFile {
            original_name,
            data,
        });
    }

    let (Some(cv), Some(jd)) = (cv, jd) else {
        return Err(AppError::MissingInput);
    };

    let response = match_documents(cv, jd, &state.uploads, state.llm.as_ref()).await?;
    Ok(Json(response))
}
