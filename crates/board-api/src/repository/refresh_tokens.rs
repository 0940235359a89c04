//! Refresh Token Repository.
//!
//! 사용자별 최신 refresh 토큰을 보관합니다. username당 레코드는 항상
//! 하나이며, 새 토큰 발급은 기존 레코드를 덮어씁니다(upsert). 이전 토큰의
//! 이력이나 폐기 목록은 없습니다. 계정당 동시 세션은 하나라는 의미입니다.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

/// Refresh 토큰 레코드.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub username: String,
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Refresh Token Repository.
pub struct RefreshTokenRepository;

impl RefreshTokenRepository {
    /// 사용자의 refresh 토큰을 저장하거나 교체합니다.
    pub async fn upsert(
        pool: &PgPool,
        username: &str,
        refresh_token: &str,
    ) -> Result<RefreshTokenRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            r#"
            INSERT INTO user_refresh_tokens (username, refresh_token)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE
            SET refresh_token = EXCLUDED.refresh_token, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(refresh_token)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}
