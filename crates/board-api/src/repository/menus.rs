//! 네비게이션 메뉴 Repository.
//!
//! 상단 메뉴와 서브 메뉴를 `show_order` 순서로 제공합니다.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

/// 메뉴 행.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MenuRecord {
    pub id: i64,
    pub name: String,
    pub name_sub: String,
    pub path: String,
    pub show_order: i32,
}

/// 서브 메뉴 행.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SubMenuRecord {
    pub id: i64,
    pub name: String,
    pub name_sub: String,
    pub path: String,
    pub show_order: i32,
    pub menu_id: i64,
}

/// 메뉴 Repository.
pub struct MenuRepository;

impl MenuRepository {
    /// 메뉴 목록 조회 (노출 순서대로).
    pub async fn list_menus(pool: &PgPool) -> Result<Vec<MenuRecord>, sqlx::Error> {
        let records = sqlx::query_as::<_, MenuRecord>(
            r#"
            SELECT id, name, name_sub, path, show_order
            FROM menus
            WHERE deleted_at IS NULL
            ORDER BY show_order
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// 특정 메뉴의 서브 메뉴 목록 조회.
    pub async fn list_sub_menus(
        pool: &PgPool,
        menu_id: i64,
    ) -> Result<Vec<SubMenuRecord>, sqlx::Error> {
        let records = sqlx::query_as::<_, SubMenuRecord>(
            r#"
            SELECT id, name, name_sub, path, show_order, menu_id
            FROM sub_menus
            WHERE menu_id = $1 AND deleted_at IS NULL
            ORDER BY show_order
            "#,
        )
        .bind(menu_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
