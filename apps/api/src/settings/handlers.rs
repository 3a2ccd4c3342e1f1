use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::settings::store::{self, KEY_GEMINI_API_KEY, KEY_RESUME};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// Masked to the last four characters for the popup prefill.
    pub gemini_api_key: Option<String>,
    pub resume: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub gemini_api_key: Option<String>,
    pub resume: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub resume_chars: usize,
}

pub async fn handle_get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    Ok(Json(settings_view(&state.db).await?))
}

/// Upserts either or both settings. An empty (or whitespace) value clears the
/// setting, so the popup's "clear field and save" gesture unsets it.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    if let Some(api_key) = &request.gemini_api_key {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            store::delete_setting(&state.db, KEY_GEMINI_API_KEY).await?;
        } else {
            store::set_string(&state.db, KEY_GEMINI_API_KEY, api_key).await?;
        }
    }

    if let Some(resume) = &request.resume {
        if resume.trim().is_empty() {
            store::delete_setting(&state.db, KEY_RESUME).await?;
        } else {
            store::set_string(&state.db, KEY_RESUME, resume).await?;
        }
    }

    Ok(Json(settings_view(&state.db).await?))
}

/// Accepts a PDF in multipart field `file`, extracts its text, and stores it
/// as the resume. Extraction runs on a blocking thread; a parser panic fails
/// only this request.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let mut pdf_bytes: Option<bytes::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            pdf_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read upload: {e}")))?,
            );
        }
    }

    let pdf_bytes = pdf_bytes
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf_bytes))
        .await
        .map_err(|e| match e.try_into_panic() {
            Ok(panic) => AppError::Validation(format!(
                "PDF parsing failed: {}",
                crate::errors::panic_message(panic)
            )),
            Err(e) => AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")),
        })?
        .map_err(|e| AppError::Validation(format!("could not read PDF: {e}")))?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "could not extract any text from the uploaded PDF".to_string(),
        ));
    }

    let resume_chars = text.chars().count();
    store::set_string(&state.db, KEY_RESUME, &text).await?;
    tracing::info!("Stored resume from PDF upload ({resume_chars} chars)");

    Ok(Json(ResumeUploadResponse { resume_chars }))
}

async fn settings_view(pool: &SqlitePool) -> Result<SettingsResponse, AppError> {
    let api_key = store::get_string(pool, KEY_GEMINI_API_KEY).await?;
    let resume = store::get_string(pool, KEY_RESUME).await?;

    Ok(SettingsResponse {
        gemini_api_key: api_key.as_deref().map(mask_key),
        resume,
    })
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("...{tail}")
}
