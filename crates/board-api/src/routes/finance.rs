//! 환율 대시보드 API 라우트.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::error::{internal_error, ApiResult};
use crate::repository::{ExchangeRate, FinanceRepository};
use crate::state::AppState;

/// GET /api/v1/finance/main - 메인 대시보드 환율 조회
///
/// 통화쌍별 최신 스냅샷만 반환합니다.
#[utoipa::path(
    get,
    path = "/api/v1/finance/main",
    responses((status = 200, description = "통화쌍별 최신 환율", body = [ExchangeRate])),
    tag = "finance"
)]
pub async fn main_dashboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExchangeRate>>> {
    let rates = FinanceRepository::latest_rates(&state.db_pool)
        .await
        .map_err(internal_error)?;

    Ok(Json(rates))
}

/// 환율 라우터 생성.
pub fn finance_router() -> Router<Arc<AppState>> {
    Router::new().route("/main", get(main_dashboard))
}
