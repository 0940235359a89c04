//! 공지 게시판 API 라우트.
//!
//! 읽기는 인증이 필요 없고, 작성은 로그인만, 수정/삭제는 원작성자만
//! 가능합니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/notices` - 게시글 목록 (페이지네이션)
//! - `POST /api/v1/notices` - 게시글 작성
//! - `GET /api/v1/notices/{id}` - 게시글 상세
//! - `PUT /api/v1/notices/{id}` - 게시글 수정 (작성자 전용)
//! - `DELETE /api/v1/notices/{id}` - 게시글 삭제 (작성자 전용)
//! - `PUT /api/v1/notices/{id}/view-count` - 조회수 증가
//! - `POST /api/v1/notices/{id}/comment` - 댓글 작성
//! - `GET /api/v1/notices/{id}/comments` - 댓글 목록
//! - `PUT /api/v1/notices/{id}/comment/{comment_id}` - 댓글 수정 (작성자 전용)
//! - `DELETE /api/v1/notices/{id}/comment/{comment_id}` - 댓글 삭제 (작성자 전용)
//! - `GET /api/v1/notices/{id}/vote` - 좋아요/싫어요 집계
//! - `POST /api/v1/notices/{id}/vote` - 투표 등록/변경

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::auth::{assert_owner, AuthUser};
use crate::error::{internal_error, not_found, ApiResult};
use crate::repository::{
    CommentRecord, NewComment, NewNotice, NoticeDetail, NoticeRepository, NoticeSummary,
    VoteCounts, VoteInput,
};
use crate::state::AppState;
use crate::types::{Page, PageParams};

/// 성공 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

/// 게시글 존재 확인 후 상세를 반환합니다.
async fn load_notice(state: &AppState, id: i64) -> ApiResult<NoticeDetail> {
    NoticeRepository::get(&state.db_pool, id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Notice not found"))
}

/// 댓글 존재 확인 후 반환합니다.
async fn load_comment(state: &AppState, comment_id: i64) -> ApiResult<CommentRecord> {
    NoticeRepository::get_comment(&state.db_pool, comment_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Notice comment not found"))
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /api/v1/notices - 게시글 작성
async fn create_notice(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(input): Json<NewNotice>,
) -> ApiResult<Json<NoticeDetail>> {
    info!(username = %user.username, "notice created");

    let notice = NoticeRepository::create(&state.db_pool, user.user_id, &input)
        .await
        .map_err(internal_error)?;

    Ok(Json(notice))
}

/// GET /api/v1/notices - 게시글 목록
async fn list_notices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<NoticeSummary>>> {
    debug!(page = params.page, "notice list");

    let (items, total) = NoticeRepository::list(&state.db_pool, &params)
        .await
        .map_err(internal_error)?;

    Ok(Json(Page::new(items, total, &params)))
}

/// GET /api/v1/notices/{id} - 게시글 상세
async fn get_notice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<NoticeDetail>> {
    let notice = load_notice(&state, id).await?;
    Ok(Json(notice))
}

/// PUT /api/v1/notices/{id}/view-count - 조회수 증가
async fn update_view_count(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<NoticeDetail>> {
    let updated = NoticeRepository::increment_views(&state.db_pool, id)
        .await
        .map_err(internal_error)?;

    if !updated {
        return Err(not_found("Notice not found"));
    }

    let notice = load_notice(&state, id).await?;
    Ok(Json(notice))
}

/// PUT /api/v1/notices/{id} - 게시글 수정 (작성자 전용)
async fn update_notice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(input): Json<NewNotice>,
) -> ApiResult<Json<NoticeDetail>> {
    let notice = load_notice(&state, id).await?;
    assert_owner(notice.writer_id, user.user_id)?;

    let updated = NoticeRepository::update(&state.db_pool, id, &input)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Notice not found"))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/notices/{id} - 게시글 삭제 (작성자 전용)
async fn delete_notice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<SuccessResponse>> {
    let notice = load_notice(&state, id).await?;
    assert_owner(notice.writer_id, user.user_id)?;

    let deleted = NoticeRepository::soft_delete(&state.db_pool, id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(not_found("Notice not found"));
    }

    info!(notice_id = id, username = %user.username, "notice deleted");
    Ok(Json(SuccessResponse {
        success: true,
        message: "게시글이 삭제되었습니다".to_string(),
    }))
}

// ================================================================================================
// Comments
// ================================================================================================

/// POST /api/v1/notices/{id}/comment - 댓글 작성
async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(input): Json<NewComment>,
) -> ApiResult<Json<CommentRecord>> {
    load_notice(&state, id).await?;

    let comment = NoticeRepository::add_comment(&state.db_pool, id, user.user_id, &input)
        .await
        .map_err(internal_error)?;

    Ok(Json(comment))
}

/// GET /api/v1/notices/{id}/comments - 댓글 목록
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<CommentRecord>>> {
    load_notice(&state, id).await?;

    let (items, total) = NoticeRepository::list_comments(&state.db_pool, id, &params)
        .await
        .map_err(internal_error)?;

    Ok(Json(Page::new(items, total, &params)))
}

/// PUT /api/v1/notices/{id}/comment/{comment_id} - 댓글 수정 (작성자 전용)
async fn update_comment(
    State(state): State<Arc<AppState>>,
    Path((id, comment_id)): Path<(i64, i64)>,
    AuthUser(user): AuthUser,
    Json(input): Json<NewComment>,
) -> ApiResult<Json<CommentRecord>> {
    load_notice(&state, id).await?;
    let comment = load_comment(&state, comment_id).await?;
    assert_owner(comment.writer_id, user.user_id)?;

    let updated = NoticeRepository::update_comment(&state.db_pool, comment_id, &input)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Notice comment not found"))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/notices/{id}/comment/{comment_id} - 댓글 삭제 (작성자 전용)
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path((id, comment_id)): Path<(i64, i64)>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<SuccessResponse>> {
    load_notice(&state, id).await?;
    let comment = load_comment(&state, comment_id).await?;
    assert_owner(comment.writer_id, user.user_id)?;

    let deleted = NoticeRepository::soft_delete_comment(&state.db_pool, comment_id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(not_found("Notice comment not found"));
    }

    Ok(Json(SuccessResponse {
        success: true,
        message: "댓글이 삭제되었습니다".to_string(),
    }))
}

// ================================================================================================
// Votes
// ================================================================================================

/// GET /api/v1/notices/{id}/vote - 투표 집계
async fn get_votes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<VoteCounts>> {
    load_notice(&state, id).await?;

    let counts = NoticeRepository::vote_counts(&state.db_pool, id)
        .await
        .map_err(internal_error)?;

    Ok(Json(counts))
}

/// POST /api/v1/notices/{id}/vote - 투표 등록/변경
async fn update_vote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(input): Json<VoteInput>,
) -> ApiResult<Json<VoteCounts>> {
    load_notice(&state, id).await?;

    let counts = NoticeRepository::upsert_vote(&state.db_pool, id, user.user_id, &input)
        .await
        .map_err(internal_error)?;

    Ok(Json(counts))
}

// ================================================================================================
// Router
// ================================================================================================

/// 공지 게시판 라우터 생성.
pub fn notices_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_notices).post(create_notice))
        .route("/{id}", get(get_notice).put(update_notice).delete(delete_notice))
        .route("/{id}/view-count", put(update_view_count))
        .route("/{id}/comment", post(create_comment))
        .route("/{id}/comments", get(list_comments))
        .route(
            "/{id}/comment/{comment_id}",
            put(update_comment).delete(delete_comment),
        )
        .route("/{id}/vote", get(get_votes).post(update_vote))
}
