//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::auth::TokenPair;
use crate::repository::{
    ExchangeRate, FaqRecord, MenuRecord, NewFaq, NewUser, SubMenuRecord, UpdateProfile,
    UserProfile,
};
use crate::routes::{
    AccessTokenResponse, ComponentHealth, ComponentStatus, EmailCheck, EmailCheckResponse,
    HealthResponse, LoginRequest, MenuWithSubs, PasswordChange, PasswordFind, SuccessResponse,
    UsernameCheck, UsernameCheckResponse,
};

/// Bearer 인증 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// StockBoard API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "StockBoard API",
        version = "0.1.0",
        description = r#"
# 주식 커뮤니티 REST API

회원 인증, 게시판, FAQ, 메뉴, 환율 대시보드를 제공하는 REST API입니다.

## 인증

로그인 후 발급받은 access 토큰을 `Authorization: Bearer <token>` 헤더로
전달합니다. access 토큰이 만료되면 refresh 토큰으로
`/api/v1/auth/refresh_token`에서 재발급받습니다.
"#
    ),
    paths(
        crate::routes::health::liveness,
        crate::routes::health::readiness,
        crate::routes::auth::duplicate_id_check,
        crate::routes::auth::duplicate_email_check,
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::refresh_token,
        crate::routes::auth::my_info,
        crate::routes::auth::update_my_info,
        crate::routes::auth::update_password,
        crate::routes::auth::forgot_password,
        crate::routes::auth::forgot_password_authnum,
        crate::routes::faq::list_faqs,
        crate::routes::faq::create_faq,
        crate::routes::faq::update_faq,
        crate::routes::faq::delete_faq,
        crate::routes::menu::list_menus,
        crate::routes::finance::main_dashboard,
    ),
    components(schemas(
        ApiErrorResponse,
        SuccessResponse,
        TokenPair,
        AccessTokenResponse,
        UserProfile,
        NewUser,
        UpdateProfile,
        UsernameCheck,
        UsernameCheckResponse,
        EmailCheck,
        EmailCheckResponse,
        LoginRequest,
        PasswordChange,
        PasswordFind,
        FaqRecord,
        NewFaq,
        MenuRecord,
        SubMenuRecord,
        MenuWithSubs,
        ExchangeRate,
        HealthResponse,
        ComponentHealth,
        ComponentStatus,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "헬스 체크"),
        (name = "auth", description = "회원 인증 및 토큰 관리"),
        (name = "faq", description = "FAQ"),
        (name = "menu", description = "네비게이션 메뉴"),
        (name = "finance", description = "환율 대시보드"),
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// `/swagger-ui`에서 문서를 제공하고, JSON 스펙은
/// `/api-docs/openapi.json`에서 제공합니다.
pub fn swagger_ui_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_builds() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "StockBoard API");

        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("/api/v1/auth/login"));
        assert!(json.contains("/api/v1/finance/main"));
    }
}
