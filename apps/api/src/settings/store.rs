//! Key/value settings persistence.
//!
//! Values are stored as JSON text keyed by name, so the two known settings
//! and any future ones share one table and one access path.

use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::errors::AppError;

pub const KEY_GEMINI_API_KEY: &str = "gemini_api_key";
pub const KEY_RESUME: &str = "resume";

pub async fn set_setting(pool: &SqlitePool, key: &str, value: &Value) -> Result<(), AppError> {
    let value_str = serde_json::to_string(value).map_err(anyhow::Error::from)?;

    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value_str)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<Value>, AppError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    match row {
        Some((value_str,)) => {
            let value: Value = serde_json::from_str(&value_str).map_err(anyhow::Error::from)?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

pub async fn delete_setting(pool: &SqlitePool, key: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(())
}

/// Reads a setting stored as a JSON string. Non-string values read as `None`.
pub async fn get_string(pool: &SqlitePool, key: &str) -> Result<Option<String>, AppError> {
    Ok(get_setting(pool, key)
        .await?
        .and_then(|v| v.as_str().map(String::from)))
}

pub async fn set_string(pool: &SqlitePool, key: &str, value: &str) -> Result<(), AppError> {
    set_setting(pool, key, &Value::String(value.to_string())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let pool = test_pool().await;
        set_string(&pool, KEY_GEMINI_API_KEY, "AIzaTest123")
            .await
            .expect("set");

        let value = get_string(&pool, KEY_GEMINI_API_KEY).await.expect("get");
        assert_eq!(value.as_deref(), Some("AIzaTest123"));
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let pool = test_pool().await;
        set_string(&pool, KEY_RESUME, "first draft").await.expect("set");
        set_string(&pool, KEY_RESUME, "second draft").await.expect("set again");

        let value = get_string(&pool, KEY_RESUME).await.expect("get");
        assert_eq!(value.as_deref(), Some("second draft"));
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let pool = test_pool().await;
        let value = get_string(&pool, "no_such_key").await.expect("get");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_value() {
        let pool = test_pool().await;
        set_string(&pool, KEY_RESUME, "to be removed").await.expect("set");
        delete_setting(&pool, KEY_RESUME).await.expect("delete");

        let value = get_string(&pool, KEY_RESUME).await.expect("get");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_non_string_value_reads_as_none_string() {
        let pool = test_pool().await;
        set_setting(&pool, "flag", &serde_json::json!(true))
            .await
            .expect("set");

        assert!(get_string(&pool, "flag").await.expect("get").is_none());
        assert_eq!(
            get_setting(&pool, "flag").await.expect("get"),
            Some(serde_json::json!(true))
        );
    }
}
