//! 종목 게시판 API 라우트.
//!
//! 공지 게시판과 같은 규칙을 따르되, 모든 경로가 종목 카테고리 이름으로
//! 시작합니다. 존재하지 않는 카테고리는 404입니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/stock` - 카테고리 목록
//! - `POST /api/v1/stock/{category}` - 게시글 작성
//! - `GET /api/v1/stock/{category}` - 게시글 목록 (페이지네이션)
//! - `GET /api/v1/stock/{category}/{id}` - 게시글 상세
//! - `PUT /api/v1/stock/{category}/{id}` - 게시글 수정 (작성자 전용)
//! - `DELETE /api/v1/stock/{category}/{id}` - 게시글 삭제 (작성자 전용)
//! - `PUT /api/v1/stock/{category}/{id}/view-count` - 조회수 증가
//! - 댓글/투표는 공지 게시판과 동일

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{debug, info};

use super::notices::SuccessResponse;
use crate::auth::{assert_owner, AuthUser};
use crate::error::{internal_error, not_found, ApiResult};
use crate::repository::{
    CommentRecord, NewComment, NewStockPost, StockCategory, StockDetail, StockRepository,
    StockSummary, VoteCounts, VoteInput,
};
use crate::state::AppState;
use crate::types::{Page, PageParams};

/// 카테고리 존재 확인.
async fn load_category(state: &AppState, name: &str) -> ApiResult<StockCategory> {
    StockRepository::find_category(&state.db_pool, name)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("stock not found"))
}

/// 게시글 존재 확인 후 상세를 반환합니다.
async fn load_post(state: &AppState, id: i64) -> ApiResult<StockDetail> {
    StockRepository::get(&state.db_pool, id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Stock post not found"))
}

/// 댓글 존재 확인 후 반환합니다.
async fn load_comment(state: &AppState, comment_id: i64) -> ApiResult<CommentRecord> {
    StockRepository::get_comment(&state.db_pool, comment_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Stock comment not found"))
}

// ================================================================================================
// Handlers
// ================================================================================================

/// GET /api/v1/stock - 카테고리 목록
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<StockCategory>>> {
    let categories = StockRepository::list_categories(&state.db_pool)
        .await
        .map_err(internal_error)?;

    Ok(Json(categories))
}

/// POST /api/v1/stock/{category} - 게시글 작성
async fn create_post(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    AuthUser(user): AuthUser,
    Json(input): Json<NewStockPost>,
) -> ApiResult<Json<StockDetail>> {
    let category = load_category(&state, &category).await?;

    info!(category = %category.name, username = %user.username, "stock post created");

    let post = StockRepository::create(&state.db_pool, category.id, user.user_id, &input)
        .await
        .map_err(internal_error)?;

    Ok(Json(post))
}

/// GET /api/v1/stock/{category} - 게시글 목록
async fn list_posts(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<StockSummary>>> {
    let category = load_category(&state, &category).await?;

    debug!(category = %category.name, page = params.page, "stock post list");

    let (items, total) = StockRepository::list(&state.db_pool, category.id, &params)
        .await
        .map_err(internal_error)?;

    Ok(Json(Page::new(items, total, &params)))
}

/// GET /api/v1/stock/{category}/{id} - 게시글 상세
async fn get_post(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, i64)>,
) -> ApiResult<Json<StockDetail>> {
    load_category(&state, &category).await?;
    let post = load_post(&state, id).await?;
    Ok(Json(post))
}

/// PUT /api/v1/stock/{category}/{id}/view-count - 조회수 증가
async fn update_view_count(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, i64)>,
) -> ApiResult<Json<StockDetail>> {
    load_category(&state, &category).await?;

    let updated = StockRepository::increment_views(&state.db_pool, id)
        .await
        .map_err(internal_error)?;

    if !updated {
        return Err(not_found("Stock post not found"));
    }

    let post = load_post(&state, id).await?;
    Ok(Json(post))
}

/// PUT /api/v1/stock/{category}/{id} - 게시글 수정 (작성자 전용)
async fn update_post(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, i64)>,
    AuthUser(user): AuthUser,
    Json(input): Json<NewStockPost>,
) -> ApiResult<Json<StockDetail>> {
    load_category(&state, &category).await?;
    let post = load_post(&state, id).await?;
    assert_owner(post.writer_id, user.user_id)?;

    let updated = StockRepository::update(&state.db_pool, id, &input)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Stock post not found"))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/stock/{category}/{id} - 게시글 삭제 (작성자 전용)
async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, i64)>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<SuccessResponse>> {
    load_category(&state, &category).await?;
    let post = load_post(&state, id).await?;
    assert_owner(post.writer_id, user.user_id)?;

    let deleted = StockRepository::soft_delete(&state.db_pool, id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(not_found("Stock post not found"));
    }

    info!(stock_id = id, username = %user.username, "stock post deleted");
    Ok(Json(SuccessResponse {
        success: true,
        message: "게시글이 삭제되었습니다".to_string(),
    }))
}

// ================================================================================================
// Comments
// ================================================================================================

/// POST /api/v1/stock/{category}/{id}/comment - 댓글 작성
async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, i64)>,
    AuthUser(user): AuthUser,
    Json(input): Json<NewComment>,
) -> ApiResult<Json<CommentRecord>> {
    load_category(&state, &category).await?;
    load_post(&state, id).await?;

    let comment = StockRepository::add_comment(&state.db_pool, id, user.user_id, &input)
        .await
        .map_err(internal_error)?;

    Ok(Json(comment))
}

/// GET /api/v1/stock/{category}/{id}/comments - 댓글 목록
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, i64)>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<CommentRecord>>> {
    load_category(&state, &category).await?;
    load_post(&state, id).await?;

    let (items, total) = StockRepository::list_comments(&state.db_pool, id, &params)
        .await
        .map_err(internal_error)?;

    Ok(Json(Page::new(items, total, &params)))
}

/// PUT /api/v1/stock/{category}/{id}/comment/{comment_id} - 댓글 수정 (작성자 전용)
async fn update_comment(
    State(state): State<Arc<AppState>>,
    Path((category, id, comment_id)): Path<(String, i64, i64)>,
    AuthUser(user): AuthUser,
    Json(input): Json<NewComment>,
) -> ApiResult<Json<CommentRecord>> {
    load_category(&state, &category).await?;
    load_post(&state, id).await?;
    let comment = load_comment(&state, comment_id).await?;
    assert_owner(comment.writer_id, user.user_id)?;

    let updated = StockRepository::update_comment(&state.db_pool, comment_id, &input)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Stock comment not found"))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/stock/{category}/{id}/comment/{comment_id} - 댓글 삭제 (작성자 전용)
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path((category, id, comment_id)): Path<(String, i64, i64)>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<SuccessResponse>> {
    load_category(&state, &category).await?;
    load_post(&state, id).await?;
    let comment = load_comment(&state, comment_id).await?;
    assert_owner(comment.writer_id, user.user_id)?;

    let deleted = StockRepository::soft_delete_comment(&state.db_pool, comment_id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(not_found("Stock comment not found"));
    }

    Ok(Json(SuccessResponse {
        success: true,
        message: "댓글이 삭제되었습니다".to_string(),
    }))
}

// ================================================================================================
// Votes
// ================================================================================================

/// GET /api/v1/stock/{category}/{id}/vote - 투표 집계
async fn get_votes(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, i64)>,
) -> ApiResult<Json<VoteCounts>> {
    load_category(&state, &category).await?;
    load_post(&state, id).await?;

    let counts = StockRepository::vote_counts(&state.db_pool, id)
        .await
        .map_err(internal_error)?;

    Ok(Json(counts))
}

/// POST /api/v1/stock/{category}/{id}/vote - 투표 등록/변경
async fn update_vote(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, i64)>,
    AuthUser(user): AuthUser,
    Json(input): Json<VoteInput>,
) -> ApiResult<Json<VoteCounts>> {
    load_category(&state, &category).await?;
    load_post(&state, id).await?;

    let counts = StockRepository::upsert_vote(&state.db_pool, id, user.user_id, &input)
        .await
        .map_err(internal_error)?;

    Ok(Json(counts))
}

// ================================================================================================
// Router
// ================================================================================================

/// 종목 게시판 라우터 생성.
pub fn stocks_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_categories))
        .route("/{category}", get(list_posts).post(create_post))
        .route(
            "/{category}/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/{category}/{id}/view-count", put(update_view_count))
        .route("/{category}/{id}/comment", post(create_comment))
        .route("/{category}/{id}/comments", get(list_comments))
        .route(
            "/{category}/{id}/comment/{comment_id}",
            put(update_comment).delete(delete_comment),
        )
        .route("/{category}/{id}/vote", get(get_votes).post(update_vote))
}
