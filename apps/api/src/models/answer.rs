use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A generated application answer, persisted so the popup can show history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnswerRow {
    pub id: String,
    pub company_name: String,
    pub job_title: String,
    pub url: String,
    pub answer_text: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}
