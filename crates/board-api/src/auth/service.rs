//! 인증 서비스.
//!
//! 회원가입, 로그인, 토큰 재발급, 비밀번호 변경/재설정 흐름을
//! 오케스트레이션합니다. 비즈니스 규칙은 전부 여기에 있고, 해시/서명은
//! [`password`](super::password) / [`jwt`](super::jwt)에, 영속화는
//! Repository에 위임합니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use super::jwt::{TokenCodec, TokenError, TokenPair, TokenScope};
use super::password::{hash_password, verify_password, PasswordError};
use crate::error::ApiErrorResponse;
use crate::repository::{
    NewUser, RefreshTokenRepository, UpdateProfile, UserRecord, UserRepository,
};

/// 인증된 사용자 참조.
///
/// access 토큰에서 복원되는 최소 식별 정보입니다. 다른 모든 모듈이
/// 소유권 검사에 사용하는 계약입니다.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
}

/// 인증 서비스 에러.
///
/// 닫힌 변형 집합으로, 전송 계층 매핑은 [`IntoResponse`] 구현 한 곳에만
/// 있습니다. 존재하지 않는 사용자와 비밀번호 불일치는 같은
/// `InvalidCredentials`로 합쳐 username 열거를 막습니다.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username already exists")]
    UsernameTaken,
    #[error("email already exists")]
    EmailTaken,
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("Inactive user")]
    InactiveAccount,
    #[error("registered email not found")]
    EmailNotFound,
    #[error("auth number does not match")]
    CodeMismatch,
    #[error("cannot access another user's account")]
    Forbidden,
    #[error("user not found")]
    NotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("비밀번호 처리 실패")]
    Password(#[from] PasswordError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// HTTP 상태 코드와 에러 코드 문자열로 매핑합니다.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::UsernameTaken => (StatusCode::CONFLICT, "USERNAME_TAKEN"),
            AuthError::EmailTaken => (StatusCode::CONFLICT, "EMAIL_TAKEN"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::InactiveAccount => (StatusCode::UNAUTHORIZED, "INACTIVE_ACCOUNT"),
            AuthError::EmailNotFound => (StatusCode::UNAUTHORIZED, "EMAIL_NOT_FOUND"),
            AuthError::CodeMismatch => (StatusCode::UNAUTHORIZED, "CODE_MISMATCH"),
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AuthError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AuthError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            AuthError::Token(TokenError::TokenExpired) => {
                (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED")
            }
            AuthError::Token(TokenError::ScopeMismatch) => {
                (StatusCode::UNAUTHORIZED, "SCOPE_MISMATCH")
            }
            AuthError::Token(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthError::Password(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PASSWORD_ERROR"),
            AuthError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        (status, Json(ApiErrorResponse::new(code, self.to_string()))).into_response()
    }
}

/// 인증 서비스.
///
/// `TokenCodec`과 DB 풀을 묶어 인증 흐름 전체를 제공합니다. 공유 가변
/// 상태는 없으며 모든 상태는 DB에 있습니다.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    codec: TokenCodec,
}

impl AuthService {
    /// 새 인증 서비스 생성.
    pub fn new(pool: PgPool, codec: TokenCodec) -> Self {
        Self { pool, codec }
    }

    /// 회원가입.
    ///
    /// username 중복을 먼저 확인하고, 비밀번호를 해싱한 뒤 저장합니다.
    /// 확인과 삽입 사이의 동시 가입 레이스는 삽입 시점의 유니크 제약
    /// 위반을 잡아 `UsernameTaken`/`EmailTaken`으로 돌려보내는 것으로
    /// 닫습니다. 생성된 계정은 메일 인증 전이므로 `is_active = false`입니다.
    pub async fn signup(&self, input: NewUser) -> Result<UserRecord, AuthError> {
        input
            .validate()
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        if UserRepository::find_by_username(&self.pool, &input.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(&input.password)?;

        match UserRepository::create(&self.pool, &input, &password_hash).await {
            Ok(user) => {
                info!(username = %user.username, "user signed up");
                Ok(user)
            }
            Err(e) => Err(Self::map_unique_violation(e)),
        }
    }

    fn map_unique_violation(e: sqlx::Error) -> AuthError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or_default();
                if constraint.contains("email") {
                    return AuthError::EmailTaken;
                }
                return AuthError::UsernameTaken;
            }
        }
        AuthError::Database(e)
    }

    /// username 사용 가능 여부.
    pub async fn username_available(&self, username: &str) -> Result<bool, AuthError> {
        Ok(UserRepository::find_by_username(&self.pool, username)
            .await?
            .is_none())
    }

    /// email 사용 가능 여부.
    pub async fn email_available(&self, email: &str) -> Result<bool, AuthError> {
        Ok(UserRepository::find_by_email(&self.pool, email)
            .await?
            .is_none())
    }

    /// username/비밀번호 재검증.
    ///
    /// 존재하지 않는 사용자와 비밀번호 불일치는 같은 에러입니다.
    /// 저장된 해시가 손상된 경우도 불일치로 취급합니다.
    async fn authenticate(&self, username: &str, password: &str) -> Result<UserRecord, AuthError> {
        let user = UserRepository::find_by_username(&self.pool, username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if verify_password(password, &user.password_hash).is_err() {
            return Err(AuthError::InvalidCredentials);
        }

        // 비밀번호가 맞아도 메일 인증 전이면 로그인 불가
        if !user.is_active {
            return Err(AuthError::InactiveAccount);
        }

        Ok(user)
    }

    /// 로그인.
    ///
    /// 성공 시 access/refresh 토큰 쌍을 발급하고, refresh 토큰 저장소의
    /// 해당 사용자 레코드를 덮어씁니다.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self.authenticate(username, password).await?;

        let pair = self.codec.issue_pair(&user.username, user.id)?;
        RefreshTokenRepository::upsert(&self.pool, &user.username, &pair.refresh_token).await?;

        info!(username = %user.username, "user logged in");
        Ok(pair)
    }

    /// Refresh 토큰으로 새 Access Token 발급.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        self.codec.refresh(refresh_token)
    }

    /// Access 토큰에서 현재 사용자 식별 정보를 복원합니다.
    pub fn current_identity(&self, access_token: &str) -> Result<CurrentUser, TokenError> {
        let claims = self.codec.decode(access_token, TokenScope::Access)?;
        Ok(CurrentUser {
            user_id: claims.user_id,
            username: claims.sub,
        })
    }

    /// 프로필 조회.
    pub async fn profile(&self, username: &str) -> Result<UserRecord, AuthError> {
        UserRepository::find_by_username(&self.pool, username)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// 프로필 수정.
    pub async fn update_profile(
        &self,
        username: &str,
        input: &UpdateProfile,
    ) -> Result<UserRecord, AuthError> {
        UserRepository::update_profile(&self.pool, username, input)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// 비밀번호 변경.
    ///
    /// 기존 비밀번호로 로그인과 동일한 규칙(비활성 계정 거부 포함)으로
    /// 재인증한 뒤 새 비밀번호를 해싱하여 저장합니다.
    pub async fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<UserRecord, AuthError> {
        let user = self.authenticate(username, old_password).await?;

        let password_hash = hash_password(new_password)?;

        let updated = UserRepository::update_password(&self.pool, &user.username, &password_hash)
            .await?
            .ok_or(AuthError::NotFound)?;

        info!(username = %updated.username, "password changed");
        Ok(updated)
    }

    /// 비밀번호 재설정 요청.
    ///
    /// 등록된 email인지 확인합니다. 인증번호 발송 자체는 외부 시스템의
    /// 몫입니다.
    pub async fn request_password_reset(&self, email: &str) -> Result<UserRecord, AuthError> {
        UserRepository::find_by_email(&self.pool, email)
            .await?
            .ok_or(AuthError::EmailNotFound)
    }

    /// 재설정 인증번호 확인.
    pub async fn verify_reset_code(&self, email: &str, code: &str) -> Result<UserRecord, AuthError> {
        UserRepository::find_by_email_and_code(&self.pool, email, code)
            .await?
            .ok_or(AuthError::CodeMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::config::AuthConfig;

    fn test_service() -> AuthService {
        let codec = TokenCodec::new(&AuthConfig {
            secret_key: "test-secret-key-for-service-testing-32-chars!".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_hours: 24,
        })
        .unwrap();

        // connect_lazy는 실제 연결 없이 풀을 만든다. 아래 테스트는 DB를
        // 건드리지 않는 코덱 경로만 사용한다.
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        let pool = PgPool::connect_lazy("postgres://localhost/board_test").unwrap();
        AuthService::new(pool, codec)
    }

    #[test]
    fn test_current_identity_roundtrip() {
        let service = test_service();
        let pair = service.codec.issue_pair("alice", 7).unwrap();

        let user = service.current_identity(&pair.access_token).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.user_id, 7);
    }

    #[test]
    fn test_current_identity_rejects_refresh_token() {
        let service = test_service();
        let pair = service.codec.issue_pair("alice", 7).unwrap();

        let result = service.current_identity(&pair.refresh_token);
        assert!(matches!(result, Err(TokenError::ScopeMismatch)));
    }

    #[test]
    fn test_refresh_yields_access_token() {
        let service = test_service();
        let pair = service.codec.issue_pair("alice", 7).unwrap();

        let access = service.refresh(&pair.refresh_token).unwrap();
        let user = service.current_identity(&access).unwrap();
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            AuthError::UsernameTaken.status_and_code().0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_and_code().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InactiveAccount.status_and_code().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Token(TokenError::TokenExpired).status_and_code(),
            (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED")
        );
        assert_eq!(
            AuthError::Token(TokenError::ScopeMismatch).status_and_code(),
            (StatusCode::UNAUTHORIZED, "SCOPE_MISMATCH")
        );
        assert_eq!(
            AuthError::NotFound.status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::InvalidInput("bad email".to_string())
                .status_and_code()
                .0,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_invalid_credentials_message_does_not_leak() {
        // 사용자 없음과 비밀번호 불일치가 같은 메시지를 공유하는지 확인
        let message = AuthError::InvalidCredentials.to_string();
        assert_eq!(message, "Incorrect username or password");
    }
}
