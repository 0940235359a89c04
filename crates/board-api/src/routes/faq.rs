//! FAQ API 라우트.
//!
//! 조회는 공개이며, 등록/수정/삭제는 관리 게이트웨이 뒤에서만 노출되는
//! 것을 전제로 인증을 요구하지 않습니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::info;

use crate::error::{internal_error, not_found, ApiResult};
use crate::repository::{FaqRecord, FaqRepository, NewFaq};
use crate::state::AppState;

/// GET /api/v1/faq - FAQ 전체 조회
#[utoipa::path(
    get,
    path = "/api/v1/faq",
    responses((status = 200, description = "FAQ 목록", body = [FaqRecord])),
    tag = "faq"
)]
pub async fn list_faqs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<FaqRecord>>> {
    let faqs = FaqRepository::list(&state.db_pool)
        .await
        .map_err(internal_error)?;

    Ok(Json(faqs))
}

/// POST /api/v1/faq - FAQ 등록
///
/// 등록 후 전체 목록을 반환합니다.
#[utoipa::path(
    post,
    path = "/api/v1/faq",
    request_body = NewFaq,
    responses((status = 200, description = "등록 후 전체 목록", body = [FaqRecord])),
    tag = "faq"
)]
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewFaq>,
) -> ApiResult<Json<Vec<FaqRecord>>> {
    let created = FaqRepository::create(&state.db_pool, &input)
        .await
        .map_err(internal_error)?;

    info!(faq_id = created.id, "faq created");

    let faqs = FaqRepository::list(&state.db_pool)
        .await
        .map_err(internal_error)?;

    Ok(Json(faqs))
}

/// PUT /api/v1/faq/{id} - FAQ 수정
#[utoipa::path(
    put,
    path = "/api/v1/faq/{id}",
    params(("id" = i64, Path, description = "FAQ ID")),
    request_body = NewFaq,
    responses(
        (status = 200, description = "수정된 FAQ", body = FaqRecord),
        (status = 404, description = "FAQ 없음"),
    ),
    tag = "faq"
)]
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<NewFaq>,
) -> ApiResult<Json<FaqRecord>> {
    let faq = FaqRepository::update(&state.db_pool, id, &input)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Faq not found"))?;

    Ok(Json(faq))
}

/// DELETE /api/v1/faq/{id} - FAQ 삭제
///
/// 삭제 후 전체 목록을 반환합니다.
#[utoipa::path(
    delete,
    path = "/api/v1/faq/{id}",
    params(("id" = i64, Path, description = "FAQ ID")),
    responses(
        (status = 200, description = "삭제 후 전체 목록", body = [FaqRecord]),
        (status = 404, description = "FAQ 없음"),
    ),
    tag = "faq"
)]
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<FaqRecord>>> {
    let deleted = FaqRepository::soft_delete(&state.db_pool, id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(not_found("Faq not found"));
    }

    let faqs = FaqRepository::list(&state.db_pool)
        .await
        .map_err(internal_error)?;

    Ok(Json(faqs))
}

/// FAQ 라우터 생성.
pub fn faq_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_faqs).post(create_faq))
        .route("/{id}", put(update_faq).delete(delete_faq))
}
