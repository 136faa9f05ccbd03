//! The matching pipeline: persist → extract → guard → prompt → complete → parse.

use anyhow::Context;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{self, ExtractError, ExtractedDocument};
use crate::llm_client::{complete_json, CompletionClient};
use crate::matching::models::{MatchResponse, MatchResult};
use crate::matching::prompts::build_match_prompt;
use crate::matching::uploads::{StoredUpload, UploadStore, UploadedFile};

/// Runs the full pipeline for one CV/JD pair. Uploads are released whatever the outcome.
pub async fn match_documents(
    cv: UploadedFile,
    jd: UploadedFile,
    store: &UploadStore,
    llm: &dyn CompletionClient,
) -> Result<MatchResponse, AppError> {
    let mut stored = Vec::with_capacity(2);
    let outcome = persist_and_match(&cv, &jd, store, llm, &mut stored).await;
    store.release(&stored).await;
    outcome
}

async fn persist_and_match(
    cv: &UploadedFile,
    jd: &UploadedFile,
    store: &UploadStore,
    llm: &dyn CompletionClient,
    stored: &mut Vec<StoredUpload>,
) -> Result<MatchResponse, AppError> {
    for file in [cv, jd] {
        let upload = store
            .persist(file)
            .await
            .with_context(|| format!("Failed to store upload '{}'", file.original_name))?;
        stored.push(upload);
    }

    let (cv_text, jd_text) = tokio::join!(
        extract_in_background(stored[0].clone()),
        extract_in_background(stored[1].clone()),
    );
    let (cv_doc, jd_doc) = match (cv_text?, jd_text?) {
        (Ok(cv_doc), Ok(jd_doc)) if !cv_doc.is_blank() && !jd_doc.is_blank() => (cv_doc, jd_doc),
        (cv_doc, jd_doc) => {
            warn!(
                "Extraction guard rejected request: cv={}, jd={}",
                describe(&cv_doc),
                describe(&jd_doc)
            );
            return Err(AppError::ExtractionFailed);
        }
    };

    let prompt = build_match_prompt(&jd_doc.text, &cv_doc.text);
    let result: MatchResult = complete_json(llm, &prompt)
        .await
        .context("Matching completion failed")?;

    info!(
        "Matched {} CV against {} JD: score {}",
        cv_doc.kind, jd_doc.kind, result.matching_score
    );
    Ok(result.into())
}

/// Decodes on the blocking pool. A panic or cancelled task is a server error, not an extraction failure.
async fn extract_in_background(
    upload: StoredUpload,
) -> Result<Result<ExtractedDocument, ExtractError>, AppError> {
    let result =
        tokio::task::spawn_blocking(move || extraction::extract(&upload.path, &upload.type_tag))
            .await
            .context("Extraction task failed")?;
    Ok(result)
}

fn describe(doc: &Result<ExtractedDocument, ExtractError>) -> String {
    match doc {
        Ok(doc) if doc.is_blank() => format!("empty {}", doc.kind),
        Ok(doc) => format!("{} chars of {}", doc.text.len(), doc.kind),
        Err(e) => e.to_string(),
    }
}
