//! FAQ Repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

/// FAQ 레코드.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FaqRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// 노출 여부 플래그
    pub flg: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// FAQ 등록 입력.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewFaq {
    pub title: String,
    pub content: String,
    #[serde(default = "default_flg")]
    pub flg: bool,
}

fn default_flg() -> bool {
    true
}

/// FAQ Repository.
pub struct FaqRepository;

impl FaqRepository {
    /// 삭제되지 않은 FAQ 전체 조회 (최신순).
    pub async fn list(pool: &PgPool) -> Result<Vec<FaqRecord>, sqlx::Error> {
        let records = sqlx::query_as::<_, FaqRecord>(
            r#"
            SELECT id, title, content, flg, created_at, updated_at
            FROM faqs
            WHERE deleted_at IS NULL
            ORDER BY id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// FAQ 단건 조회.
    pub async fn get(pool: &PgPool, id: i64) -> Result<Option<FaqRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, FaqRecord>(
            r#"
            SELECT id, title, content, flg, created_at, updated_at
            FROM faqs
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// FAQ 등록.
    pub async fn create(pool: &PgPool, input: &NewFaq) -> Result<FaqRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, FaqRecord>(
            r#"
            INSERT INTO faqs (title, content, flg)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, flg, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.flg)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// FAQ 수정.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        input: &NewFaq,
    ) -> Result<Option<FaqRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, FaqRecord>(
            r#"
            UPDATE faqs
            SET title = $2, content = $3, flg = $4, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, title, content, flg, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.flg)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// FAQ soft delete.
    pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE faqs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
