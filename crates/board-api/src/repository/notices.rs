//! 공지 게시판 Repository.
//!
//! 게시글, 댓글, 좋아요/싫어요 투표의 데이터베이스 연산을 담당합니다.
//! 게시글과 댓글은 `deleted_at` 타임스탬프로 soft delete합니다.
//! 작성자 표시 이름은 email의 로컬 파트(@ 앞부분)입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

use crate::types::PageParams;

// ================================================================================================
// Types
// ================================================================================================

/// 게시글 목록 행.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct NoticeSummary {
    pub id: i64,
    pub title: String,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    /// 삭제되지 않은 댓글 수
    pub comment_count: i64,
    /// 작성자 표시 이름
    pub writer: String,
}

/// 게시글 상세.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct NoticeDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub views: i32,
    pub like_count: i64,
    pub hate_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 작성자 user id (소유권 검사에 사용)
    pub writer_id: i64,
    pub writer: String,
}

/// 게시글 작성/수정 입력.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewNotice {
    pub title: String,
    pub content: String,
}

/// 댓글 행.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CommentRecord {
    pub id: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 작성자 user id (소유권 검사에 사용)
    pub writer_id: i64,
    pub writer: String,
}

/// 댓글 작성/수정 입력.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewComment {
    pub comment: String,
}

/// 게시글의 투표 집계.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct VoteCounts {
    pub like_count: i64,
    pub hate_count: i64,
}

/// 투표 입력. 사용자당 게시글 하나에 투표 행 하나만 유지됩니다.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VoteInput {
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub hated: bool,
}

// ================================================================================================
// Repository
// ================================================================================================

/// 공지 게시판 Repository.
pub struct NoticeRepository;

impl NoticeRepository {
    /// 게시글 생성 후 상세를 반환합니다.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        input: &NewNotice,
    ) -> Result<NoticeDetail, sqlx::Error> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO notices (title, content, user_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Self::get(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// 게시글 목록 조회 (작성자/댓글 수 포함).
    pub async fn list(
        pool: &PgPool,
        params: &PageParams,
    ) -> Result<(Vec<NoticeSummary>, i64), sqlx::Error> {
        let items = sqlx::query_as::<_, NoticeSummary>(
            r#"
            SELECT n.id, n.title, n.views, n.created_at,
                   COUNT(c.id) FILTER (WHERE c.deleted_at IS NULL) AS comment_count,
                   split_part(u.email, '@', 1) AS writer
            FROM notices n
            JOIN users u ON n.user_id = u.id
            LEFT JOIN notice_comments c ON c.notice_id = n.id
            WHERE n.deleted_at IS NULL
            GROUP BY n.id, u.email
            ORDER BY n.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notices WHERE deleted_at IS NULL")
                .fetch_one(pool)
                .await?;

        Ok((items, total))
    }

    /// 게시글 상세 조회 (투표 집계 포함).
    pub async fn get(pool: &PgPool, id: i64) -> Result<Option<NoticeDetail>, sqlx::Error> {
        let record = sqlx::query_as::<_, NoticeDetail>(
            r#"
            SELECT n.id, n.title, n.content, n.views,
                   COALESCE(SUM(CASE WHEN v.liked THEN 1 ELSE 0 END), 0) AS like_count,
                   COALESCE(SUM(CASE WHEN v.hated THEN 1 ELSE 0 END), 0) AS hate_count,
                   n.created_at, n.updated_at,
                   u.id AS writer_id,
                   split_part(u.email, '@', 1) AS writer
            FROM notices n
            JOIN users u ON n.user_id = u.id
            LEFT JOIN notice_votes v ON v.notice_id = n.id
            WHERE n.id = $1 AND n.deleted_at IS NULL
            GROUP BY n.id, u.id, u.email
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 조회수 1 증가.
    pub async fn increment_views(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notices SET views = views + 1 WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 게시글 수정 후 상세를 반환합니다.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        input: &NewNotice,
    ) -> Result<Option<NoticeDetail>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE notices
            SET title = $2, content = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::get(pool, id).await
    }

    /// 게시글 soft delete.
    pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notices SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================================================================
    // Comments
    // ============================================================================================

    /// 댓글 작성.
    pub async fn add_comment(
        pool: &PgPool,
        notice_id: i64,
        user_id: i64,
        input: &NewComment,
    ) -> Result<CommentRecord, sqlx::Error> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO notice_comments (comment, notice_id, user_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.comment)
        .bind(notice_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Self::get_comment(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// 게시글의 댓글 목록 조회.
    pub async fn list_comments(
        pool: &PgPool,
        notice_id: i64,
        params: &PageParams,
    ) -> Result<(Vec<CommentRecord>, i64), sqlx::Error> {
        let items = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT c.id, c.comment, c.created_at, c.updated_at,
                   u.id AS writer_id,
                   split_part(u.email, '@', 1) AS writer
            FROM notice_comments c
            JOIN users u ON c.user_id = u.id
            WHERE c.notice_id = $1 AND c.deleted_at IS NULL
            ORDER BY c.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(notice_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notice_comments WHERE notice_id = $1 AND deleted_at IS NULL",
        )
        .bind(notice_id)
        .fetch_one(pool)
        .await?;

        Ok((items, total))
    }

    /// 댓글 단건 조회.
    pub async fn get_comment(
        pool: &PgPool,
        comment_id: i64,
    ) -> Result<Option<CommentRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT c.id, c.comment, c.created_at, c.updated_at,
                   u.id AS writer_id,
                   split_part(u.email, '@', 1) AS writer
            FROM notice_comments c
            JOIN users u ON c.user_id = u.id
            WHERE c.id = $1 AND c.deleted_at IS NULL
            "#,
        )
        .bind(comment_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 댓글 수정.
    pub async fn update_comment(
        pool: &PgPool,
        comment_id: i64,
        input: &NewComment,
    ) -> Result<Option<CommentRecord>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE notice_comments
            SET comment = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(comment_id)
        .bind(&input.comment)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::get_comment(pool, comment_id).await
    }

    /// 댓글 soft delete.
    pub async fn soft_delete_comment(pool: &PgPool, comment_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notice_comments SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(comment_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================================================================
    // Votes
    // ============================================================================================

    /// 게시글의 투표 집계 조회.
    pub async fn vote_counts(pool: &PgPool, notice_id: i64) -> Result<VoteCounts, sqlx::Error> {
        let counts = sqlx::query_as::<_, VoteCounts>(
            r#"
            SELECT COALESCE(SUM(CASE WHEN liked THEN 1 ELSE 0 END), 0) AS like_count,
                   COALESCE(SUM(CASE WHEN hated THEN 1 ELSE 0 END), 0) AS hate_count
            FROM notice_votes
            WHERE notice_id = $1
            "#,
        )
        .bind(notice_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }

    /// 사용자의 투표를 저장하거나 교체한 뒤 집계를 반환합니다.
    pub async fn upsert_vote(
        pool: &PgPool,
        notice_id: i64,
        user_id: i64,
        input: &VoteInput,
    ) -> Result<VoteCounts, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO notice_votes (notice_id, user_id, liked, hated)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (notice_id, user_id) DO UPDATE
            SET liked = EXCLUDED.liked, hated = EXCLUDED.hated, updated_at = NOW()
            "#,
        )
        .bind(notice_id)
        .bind(user_id)
        .bind(input.liked)
        .bind(input.hated)
        .execute(pool)
        .await?;

        Self::vote_counts(pool, notice_id).await
    }
}
