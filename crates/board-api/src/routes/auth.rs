//! 인증 API 라우트.
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/auth/signup/duplicate_id_check` - username 중복 확인
//! - `POST /api/v1/auth/signup/duplicate_email_check` - email 중복 확인
//! - `POST /api/v1/auth/signup` - 회원가입
//! - `POST /api/v1/auth/login` - 로그인 (access + refresh 토큰 발급)
//! - `POST /api/v1/auth/refresh_token` - access 토큰 재발급
//! - `GET /api/v1/auth/{username}/MyInfo` - 내 정보 조회
//! - `PUT /api/v1/auth/{username}/MyInfo` - 내 정보 수정
//! - `PUT /api/v1/auth/{username}/pw` - 비밀번호 변경
//! - `POST /api/v1/auth/forgot-password` - 비밀번호 재설정 요청
//! - `POST /api/v1/auth/forgot-password/auth-number` - 재설정 인증번호 확인

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::auth::{AuthError, AuthUser, Bearer, CurrentUser, TokenPair};
use crate::repository::{NewUser, UpdateProfile, UserProfile};
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// username 중복 확인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UsernameCheck {
    pub username: String,
}

/// username 중복 확인 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsernameCheckResponse {
    pub username: String,
    pub result: bool,
}

/// email 중복 확인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailCheck {
    pub email: String,
}

/// email 중복 확인 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailCheckResponse {
    pub email: String,
    pub result: bool,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Access 토큰 재발급 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// 비밀번호 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordChange {
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    pub password: String,
}

/// 비밀번호 재설정 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordFind {
    pub email: String,
    #[serde(rename = "authNum", default)]
    pub auth_num: Option<String>,
}

/// 요청 경로의 username이 토큰의 사용자 본인인지 확인합니다.
fn assert_self(path_username: &str, user: &CurrentUser) -> Result<(), AuthError> {
    if path_username == user.username {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /api/v1/auth/signup/duplicate_id_check - username 중복 확인
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup/duplicate_id_check",
    request_body = UsernameCheck,
    responses(
        (status = 200, description = "사용 가능한 username", body = UsernameCheckResponse),
        (status = 409, description = "이미 사용 중인 username"),
    ),
    tag = "auth"
)]
pub async fn duplicate_id_check(
    State(state): State<Arc<AppState>>,
    Json(input): Json<UsernameCheck>,
) -> Result<Json<UsernameCheckResponse>, AuthError> {
    if !state.auth.username_available(&input.username).await? {
        return Err(AuthError::UsernameTaken);
    }

    Ok(Json(UsernameCheckResponse {
        username: input.username,
        result: true,
    }))
}

/// POST /api/v1/auth/signup/duplicate_email_check - email 중복 확인
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup/duplicate_email_check",
    request_body = EmailCheck,
    responses(
        (status = 200, description = "사용 가능한 email", body = EmailCheckResponse),
        (status = 409, description = "이미 사용 중인 email"),
    ),
    tag = "auth"
)]
pub async fn duplicate_email_check(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EmailCheck>,
) -> Result<Json<EmailCheckResponse>, AuthError> {
    if !state.auth.email_available(&input.email).await? {
        return Err(AuthError::EmailTaken);
    }

    Ok(Json(EmailCheckResponse {
        email: input.email,
        result: true,
    }))
}

/// POST /api/v1/auth/signup - 회원가입
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = NewUser,
    responses(
        (status = 200, description = "생성된 사용자 (메일 인증 전, is_active=false)", body = UserProfile),
        (status = 409, description = "username 또는 email 중복"),
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewUser>,
) -> Result<Json<UserProfile>, AuthError> {
    let user = state.auth.signup(input).await?;
    Ok(Json(UserProfile::from(user)))
}

/// POST /api/v1/auth/login - 로그인
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "access + refresh 토큰 쌍", body = TokenPair),
        (status = 401, description = "잘못된 자격증명 또는 비활성 계정"),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let pair = state.auth.login(&input.username, &input.password).await?;
    Ok(Json(pair))
}

/// POST /api/v1/auth/refresh_token - access 토큰 재발급
///
/// Authorization 헤더에 refresh 토큰을 Bearer로 전달합니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh_token",
    responses(
        (status = 200, description = "새 access 토큰", body = AccessTokenResponse),
        (status = 401, description = "만료/위조/scope 불일치 refresh 토큰"),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Bearer(token): Bearer,
) -> Result<Json<AccessTokenResponse>, AuthError> {
    let access_token = state.auth.refresh(&token)?;
    Ok(Json(AccessTokenResponse { access_token }))
}

/// GET /api/v1/auth/{username}/MyInfo - 내 정보 조회
#[utoipa::path(
    get,
    path = "/api/v1/auth/{username}/MyInfo",
    params(("username" = String, Path, description = "사용자 이름")),
    responses(
        (status = 200, description = "사용자 프로필", body = UserProfile),
        (status = 401, description = "인증되지 않음"),
        (status = 403, description = "본인 계정이 아님"),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn my_info(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProfile>, AuthError> {
    assert_self(&username, &user)?;

    debug!(username = %username, "profile lookup");
    let record = state.auth.profile(&username).await?;
    Ok(Json(UserProfile::from(record)))
}

/// PUT /api/v1/auth/{username}/MyInfo - 내 정보 수정
#[utoipa::path(
    put,
    path = "/api/v1/auth/{username}/MyInfo",
    params(("username" = String, Path, description = "사용자 이름")),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "수정된 프로필", body = UserProfile),
        (status = 401, description = "인증되지 않음"),
        (status = 403, description = "본인 계정이 아님"),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn update_my_info(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    AuthUser(user): AuthUser,
    Json(input): Json<UpdateProfile>,
) -> Result<Json<UserProfile>, AuthError> {
    assert_self(&username, &user)?;

    let record = state.auth.update_profile(&username, &input).await?;
    Ok(Json(UserProfile::from(record)))
}

/// PUT /api/v1/auth/{username}/pw - 비밀번호 변경
#[utoipa::path(
    put,
    path = "/api/v1/auth/{username}/pw",
    params(("username" = String, Path, description = "사용자 이름")),
    request_body = PasswordChange,
    responses(
        (status = 200, description = "변경 완료", body = UserProfile),
        (status = 401, description = "기존 비밀번호 불일치"),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    AuthUser(user): AuthUser,
    Json(input): Json<PasswordChange>,
) -> Result<Json<UserProfile>, AuthError> {
    assert_self(&username, &user)?;

    let record = state
        .auth
        .change_password(&username, &input.old_password, &input.password)
        .await?;
    Ok(Json(UserProfile::from(record)))
}

/// POST /api/v1/auth/forgot-password - 비밀번호 재설정 요청
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = PasswordFind,
    responses(
        (status = 200, description = "등록된 사용자", body = UserProfile),
        (status = 401, description = "등록되지 않은 email"),
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PasswordFind>,
) -> Result<Json<UserProfile>, AuthError> {
    let record = state.auth.request_password_reset(&input.email).await?;
    // 인증 메일 발송은 외부 시스템 담당
    Ok(Json(UserProfile::from(record)))
}

/// POST /api/v1/auth/forgot-password/auth-number - 재설정 인증번호 확인
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password/auth-number",
    request_body = PasswordFind,
    responses(
        (status = 200, description = "인증번호 일치", body = UserProfile),
        (status = 401, description = "인증번호 불일치"),
    ),
    tag = "auth"
)]
pub async fn forgot_password_authnum(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PasswordFind>,
) -> Result<Json<UserProfile>, AuthError> {
    let code = input.auth_num.as_deref().unwrap_or_default();
    let record = state.auth.verify_reset_code(&input.email, code).await?;
    Ok(Json(UserProfile::from(record)))
}

// ================================================================================================
// Router
// ================================================================================================

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup/duplicate_id_check", post(duplicate_id_check))
        .route("/signup/duplicate_email_check", post(duplicate_email_check))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh_token", post(refresh_token))
        .route("/{username}/MyInfo", get(my_info).put(update_my_info))
        .route("/{username}/pw", put(update_password))
        .route("/forgot-password", post(forgot_password))
        .route("/forgot-password/auth-number", post(forgot_password_authnum))
}
