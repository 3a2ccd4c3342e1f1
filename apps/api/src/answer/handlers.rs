use axum::extract::{Path, State};
use axum::Json;

use crate::answer::generator::{self, GeneratedAnswer};
use crate::errors::AppError;
use crate::models::answer::AnswerRow;
use crate::scan::handlers::{acquire_and_scan, ScanRequest};
use crate::state::AppState;

const HISTORY_LIMIT: i64 = 50;

/// Scan the posting, then generate and record a tailored answer for it.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<GeneratedAnswer>, AppError> {
    let data = acquire_and_scan(&state, request).await?;
    let generated = generator::generate_answer(&state.db, state.answerer.as_ref(), data).await?;
    tracing::info!(
        "Generated answer {} for {}",
        generated.answer_id,
        generated.data.url
    );
    Ok(Json(generated))
}

pub async fn handle_list_answers(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnswerRow>>, AppError> {
    Ok(Json(generator::list_answers(&state.db, HISTORY_LIMIT).await?))
}

pub async fn handle_get_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnswerRow>, AppError> {
    Ok(Json(generator::get_answer(&state.db, &id).await?))
}
