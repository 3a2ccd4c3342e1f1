//! The generation pipeline: settings guards, prompt build, Gemini call,
//! history insert.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::AnswerModel;
use crate::models::answer::AnswerRow;
use crate::scan::extractor::ScannedData;
use crate::settings::store::{self, KEY_GEMINI_API_KEY, KEY_RESUME};

use super::prompts::build_answer_prompt;

#[derive(Debug, Serialize)]
pub struct GeneratedAnswer {
    pub answer_id: String,
    pub answer: String,
    pub model: String,
    pub data: ScannedData,
}

/// Generates a tailored answer for a scanned posting and records it.
///
/// Both settings must be present first; the guard wording matches what the
/// popup shows the user.
pub async fn generate_answer(
    pool: &SqlitePool,
    model: &dyn AnswerModel,
    data: ScannedData,
) -> Result<GeneratedAnswer, AppError> {
    let api_key = store::get_string(pool, KEY_GEMINI_API_KEY)
        .await?
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("Please set API Key in Settings first.".to_string())
        })?;

    let resume = store::get_string(pool, KEY_RESUME)
        .await?
        .filter(|resume| !resume.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("Please save your Resume in Settings first.".to_string())
        })?;

    let prompt = build_answer_prompt(&data, &resume);
    let answer = model
        .generate(&api_key, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Gemini error: {e}")))?;

    let row = AnswerRow {
        id: Uuid::new_v4().to_string(),
        company_name: data.company_name.clone(),
        job_title: data.job_title.clone(),
        url: data.url.clone(),
        answer_text: answer,
        model: model.model_name().to_string(),
        created_at: Utc::now(),
    };
    insert_answer(pool, &row).await?;

    Ok(GeneratedAnswer {
        answer_id: row.id,
        answer: row.answer_text,
        model: row.model,
        data,
    })
}

pub async fn list_answers(pool: &SqlitePool, limit: i64) -> Result<Vec<AnswerRow>, AppError> {
    let rows = sqlx::query_as::<_, AnswerRow>(
        r#"
        SELECT id, company_name, job_title, url, answer_text, model, created_at
        FROM answers
        ORDER BY created_at DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_answer(pool: &SqlitePool, id: &str) -> Result<AnswerRow, AppError> {
    sqlx::query_as::<_, AnswerRow>(
        r#"
        SELECT id, company_name, job_title, url, answer_text, model, created_at
        FROM answers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("answer {id} not found")))
}

async fn insert_answer(pool: &SqlitePool, row: &AnswerRow) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO answers (id, company_name, job_title, url, answer_text, model, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&row.id)
    .bind(&row.company_name)
    .bind(&row.job_title)
    .bind(&row.url)
    .bind(&row.answer_text)
    .bind(&row.model)
    .bind(row.created_at)
    .execute(pool)
    .await?;

    Ok(())
}
