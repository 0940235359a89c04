//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! `AppState`는 Arc로 래핑되어 Axum의 State extractor를 통해 핸들러에
//! 주입됩니다. 공유 가변 메모리 상태는 없습니다. 모든 상태는 DB에 있고,
//! 동시성은 요청 단위로 호스트 런타임이 제공합니다.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::auth::AuthService;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (PostgreSQL)
    pub db_pool: PgPool,

    /// 인증 서비스 - 토큰 발급/검증, 로그인/가입 규칙
    pub auth: AuthService,

    /// API 버전
    pub version: String,

    /// 서버 시작 시각 (헬스 체크 uptime 계산용)
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 새 애플리케이션 상태 생성.
    pub fn new(db_pool: PgPool, auth: AuthService) -> Self {
        Self {
            db_pool,
            auth,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }
}
