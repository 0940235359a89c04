//! 네비게이션 메뉴 API 라우트.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{internal_error, ApiResult};
use crate::repository::{MenuRecord, MenuRepository, SubMenuRecord};
use crate::state::AppState;

/// 서브 메뉴가 포함된 메뉴 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuWithSubs {
    /// 메뉴 정보
    #[serde(flatten)]
    pub menu: MenuRecord,
    /// 서브 메뉴 목록 (노출 순서대로)
    pub sub: Vec<SubMenuRecord>,
}

/// GET /api/v1/menu - 메뉴 트리 조회
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    responses((status = 200, description = "메뉴 목록 (서브 메뉴 포함)", body = [MenuWithSubs])),
    tag = "menu"
)]
pub async fn list_menus(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<MenuWithSubs>>> {
    let menus = MenuRepository::list_menus(&state.db_pool)
        .await
        .map_err(internal_error)?;

    let mut result = Vec::with_capacity(menus.len());
    for menu in menus {
        let sub = MenuRepository::list_sub_menus(&state.db_pool, menu.id)
            .await
            .map_err(internal_error)?;
        result.push(MenuWithSubs { menu, sub });
    }

    Ok(Json(result))
}

/// 메뉴 라우터 생성.
pub fn menu_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_menus))
}
