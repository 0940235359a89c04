//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness / readiness)
//! - `/api/v1/auth` - 회원가입, 로그인, 토큰 재발급, 프로필
//! - `/api/v1/notices` - 공지 게시판 (게시글/댓글/투표)
//! - `/api/v1/stock` - 종목 게시판 (카테고리별 게시글/댓글/투표)
//! - `/api/v1/faq` - FAQ
//! - `/api/v1/menu` - 네비게이션 메뉴
//! - `/api/v1/finance` - 환율 대시보드

pub mod auth;
pub mod faq;
pub mod finance;
pub mod health;
pub mod menu;
pub mod notices;
pub mod stocks;

pub use auth::{
    auth_router, AccessTokenResponse, EmailCheck, EmailCheckResponse, LoginRequest,
    PasswordChange, PasswordFind, UsernameCheck, UsernameCheckResponse,
};
pub use faq::faq_router;
pub use finance::finance_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use menu::{menu_router, MenuWithSubs};
pub use notices::{notices_router, SuccessResponse};
pub use stocks::stocks_router;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API v1 엔드포인트
        .nest("/api/v1/auth", auth_router())
        .nest("/api/v1/notices", notices_router())
        .nest("/api/v1/stock", stocks_router())
        .nest("/api/v1/faq", faq_router())
        .nest("/api/v1/menu", menu_router())
        .nest("/api/v1/finance", finance_router())
}
