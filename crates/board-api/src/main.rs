//! 주식 커뮤니티 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 인증, 게시판, FAQ, 메뉴, 환율 조회 엔드포인트를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::StatusCode;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use board_api::auth::{AuthService, TokenCodec};
use board_api::openapi::swagger_ui_router;
use board_api::routes::create_api_router;
use board_api::state::AppState;
use board_core::config::AppConfig;
use board_core::logging::init_logging_from_env;

/// CORS 미들웨어 구성.
///
/// 설정에 origin 목록이 있으면 해당 origin만 허용하고, 비어 있으면
/// 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        warn!("CORS origins not configured, allowing any origin (development mode)");
        AllowOrigin::any()
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();
        if parsed.is_empty() {
            warn!("CORS origins configured but none valid, allowing any origin");
            AllowOrigin::any()
        } else {
            info!("CORS configured with {} allowed origins", parsed.len());
            AllowOrigin::list(parsed)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .merge(create_api_router().with_state(state))
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors)
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // tracing 초기화
    init_logging_from_env().map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!("Starting StockBoard API server...");

    // 설정 로드 - 필수 값 누락은 여기서 프로세스를 종료시킨다
    let config = match std::env::var("BOARD_CONFIG") {
        Ok(path) => AppConfig::load(&path)
            .with_context(|| format!("설정 파일 로드 실패: {}", path))?,
        Err(_) => AppConfig::from_env().context("환경변수 설정 로드 실패")?,
    };

    // JWT 코덱 생성 (알고리즘 검증 포함)
    let codec = TokenCodec::new(&config.auth).context("토큰 코덱 생성 실패")?;

    // 데이터베이스 연결 풀 생성
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
        .idle_timeout(Duration::from_secs(config.database.idle_timeout_secs))
        .connect(&config.database.url)
        .await
        .context("데이터베이스 연결 실패")?;

    info!(
        max_connections = config.database.max_connections,
        "Database pool initialized"
    );

    // 스키마 마이그레이션 적용
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("마이그레이션 실행 실패")?;
    info!("Database migrations applied");

    // 인증 서비스 및 공유 상태 구성
    let auth = AuthService::new(pool.clone(), codec);
    let state = Arc::new(AppState::new(pool, auth));

    info!(version = %state.version, "Application state initialized");

    // 라우터 생성
    let app = create_router(state, cors_layer(&config.server.cors_origins));

    // 서버 시작
    let addr = config.bind_addr();
    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("주소 바인딩 실패: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
