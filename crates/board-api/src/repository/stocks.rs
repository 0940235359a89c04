//! 종목 게시판 Repository.
//!
//! 공지 게시판과 같은 패턴이지만 종목 카테고리로 범위가 나뉩니다.
//! 댓글/투표 행은 공지 게시판과 같은 형태를 공유합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

use super::notices::{CommentRecord, NewComment, VoteCounts, VoteInput};
use crate::types::PageParams;

// ================================================================================================
// Types
// ================================================================================================

/// 종목 카테고리.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StockCategory {
    pub id: i64,
    /// URL 경로에 쓰이는 이름 (예: "samsung")
    pub name: String,
    /// 화면 표시 이름
    pub show_name: String,
    pub path: String,
}

/// 종목 게시글 목록 행.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StockSummary {
    pub id: i64,
    pub title: String,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub comment_count: i64,
    pub like_count: i64,
    pub writer: String,
}

/// 종목 게시글 상세.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StockDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub views: i32,
    pub like_count: i64,
    pub hate_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 작성자 user id (소유권 검사에 사용)
    pub writer_id: i64,
    pub writer: String,
}

/// 종목 게시글 작성/수정 입력.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewStockPost {
    pub title: String,
    pub content: String,
}

// ================================================================================================
// Repository
// ================================================================================================

/// 종목 게시판 Repository.
pub struct StockRepository;

impl StockRepository {
    /// 모든 종목 카테고리 조회.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<StockCategory>, sqlx::Error> {
        let records = sqlx::query_as::<_, StockCategory>(
            r#"
            SELECT id, name, show_name, path
            FROM stock_categories
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// 이름으로 카테고리 조회.
    pub async fn find_category(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<StockCategory>, sqlx::Error> {
        let record = sqlx::query_as::<_, StockCategory>(
            r#"
            SELECT id, name, show_name, path
            FROM stock_categories
            WHERE name = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 게시글 생성 후 상세를 반환합니다.
    pub async fn create(
        pool: &PgPool,
        category_id: i64,
        user_id: i64,
        input: &NewStockPost,
    ) -> Result<StockDetail, sqlx::Error> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO stock_posts (title, content, category_id, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(category_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Self::get(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// 카테고리의 게시글 목록 조회.
    pub async fn list(
        pool: &PgPool,
        category_id: i64,
        params: &PageParams,
    ) -> Result<(Vec<StockSummary>, i64), sqlx::Error> {
        let items = sqlx::query_as::<_, StockSummary>(
            r#"
            SELECT s.id, s.title, s.views, s.created_at,
                   (SELECT COUNT(*) FROM stock_comments c
                    WHERE c.stock_id = s.id AND c.deleted_at IS NULL) AS comment_count,
                   (SELECT COALESCE(SUM(CASE WHEN v.liked THEN 1 ELSE 0 END), 0)
                    FROM stock_votes v WHERE v.stock_id = s.id) AS like_count,
                   split_part(u.email, '@', 1) AS writer
            FROM stock_posts s
            JOIN users u ON s.user_id = u.id
            WHERE s.category_id = $1 AND s.deleted_at IS NULL
            ORDER BY s.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM stock_posts WHERE category_id = $1 AND deleted_at IS NULL",
        )
        .bind(category_id)
        .fetch_one(pool)
        .await?;

        Ok((items, total))
    }

    /// 게시글 상세 조회.
    pub async fn get(pool: &PgPool, id: i64) -> Result<Option<StockDetail>, sqlx::Error> {
        let record = sqlx::query_as::<_, StockDetail>(
            r#"
            SELECT s.id, s.title, s.content, s.views,
                   (SELECT COALESCE(SUM(CASE WHEN v.liked THEN 1 ELSE 0 END), 0)
                    FROM stock_votes v WHERE v.stock_id = s.id) AS like_count,
                   (SELECT COALESCE(SUM(CASE WHEN v.hated THEN 1 ELSE 0 END), 0)
                    FROM stock_votes v WHERE v.stock_id = s.id) AS hate_count,
                   (SELECT COUNT(*) FROM stock_comments c
                    WHERE c.stock_id = s.id AND c.deleted_at IS NULL) AS comment_count,
                   s.created_at, s.updated_at,
                   u.id AS writer_id,
                   split_part(u.email, '@', 1) AS writer
            FROM stock_posts s
            JOIN users u ON s.user_id = u.id
            WHERE s.id = $1 AND s.deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 조회수 1 증가.
    pub async fn increment_views(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE stock_posts SET views = views + 1 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 게시글 수정 후 상세를 반환합니다.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        input: &NewStockPost,
    ) -> Result<Option<StockDetail>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE stock_posts
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
            "UPDATE stock_posts SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
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
        stock_id: i64,
        user_id: i64,
        input: &NewComment,
    ) -> Result<CommentRecord, sqlx::Error> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO stock_comments (comment, stock_id, user_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.comment)
        .bind(stock_id)
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
        stock_id: i64,
        params: &PageParams,
    ) -> Result<(Vec<CommentRecord>, i64), sqlx::Error> {
        let items = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT c.id, c.comment, c.created_at, c.updated_at,
                   u.id AS writer_id,
                   split_part(u.email, '@', 1) AS writer
            FROM stock_comments c
            JOIN users u ON c.user_id = u.id
            WHERE c.stock_id = $1 AND c.deleted_at IS NULL
            ORDER BY c.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(stock_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM stock_comments WHERE stock_id = $1 AND deleted_at IS NULL",
        )
        .bind(stock_id)
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
            FROM stock_comments c
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
            UPDATE stock_comments
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
            "UPDATE stock_comments SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
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
    pub async fn vote_counts(pool: &PgPool, stock_id: i64) -> Result<VoteCounts, sqlx::Error> {
        let counts = sqlx::query_as::<_, VoteCounts>(
            r#"
            SELECT COALESCE(SUM(CASE WHEN liked THEN 1 ELSE 0 END), 0) AS like_count,
                   COALESCE(SUM(CASE WHEN hated THEN 1 ELSE 0 END), 0) AS hate_count
            FROM stock_votes
            WHERE stock_id = $1
            "#,
        )
        .bind(stock_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }

    /// 사용자의 투표를 저장하거나 교체한 뒤 집계를 반환합니다.
    pub async fn upsert_vote(
        pool: &PgPool,
        stock_id: i64,
        user_id: i64,
        input: &VoteInput,
    ) -> Result<VoteCounts, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO stock_votes (stock_id, user_id, liked, hated)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (stock_id, user_id) DO UPDATE
            SET liked = EXCLUDED.liked, hated = EXCLUDED.hated, updated_at = NOW()
            "#,
        )
        .bind(stock_id)
        .bind(user_id)
        .bind(input.liked)
        .bind(input.hated)
        .execute(pool)
        .await?;

        Self::vote_counts(pool, stock_id).await
    }
}
