//! Axum용 JWT 인증 추출기.
//!
//! Authorization 헤더의 Bearer 토큰을 검증하여 핸들러에 인증된 사용자
//! 정보를 주입합니다.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::jwt::TokenError;
use super::service::CurrentUser;
use crate::error::ApiErrorResponse;
use crate::state::AppState;

/// 인증 헤더 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthHeaderError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("토큰 scope가 올바르지 않습니다")]
    ScopeMismatch,
}

impl From<TokenError> for AuthHeaderError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::TokenExpired => AuthHeaderError::TokenExpired,
            TokenError::ScopeMismatch => AuthHeaderError::ScopeMismatch,
            _ => AuthHeaderError::InvalidToken,
        }
    }
}

impl IntoResponse for AuthHeaderError {
    fn into_response(self) -> Response {
        let code = match &self {
            AuthHeaderError::MissingToken => "MISSING_TOKEN",
            AuthHeaderError::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            AuthHeaderError::TokenExpired => "TOKEN_EXPIRED",
            AuthHeaderError::InvalidToken => "INVALID_TOKEN",
            AuthHeaderError::ScopeMismatch => "SCOPE_MISMATCH",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorResponse::new(code, self.to_string())),
        )
            .into_response()
    }
}

/// Authorization 헤더에서 Bearer 토큰을 추출합니다.
fn bearer_token(parts: &Parts) -> Result<&str, AuthHeaderError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthHeaderError::MissingToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthHeaderError::InvalidAuthHeader)
}

/// 원시 Bearer 토큰 추출기.
///
/// refresh 엔드포인트처럼 토큰 문자열 자체가 필요한 핸들러에서 사용합니다.
#[derive(Debug, Clone)]
pub struct Bearer(pub String);

impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = AuthHeaderError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Bearer(bearer_token(parts)?.to_string()))
    }
}

/// JWT 인증 추출기.
///
/// access 토큰을 검증하고 인증된 사용자 참조를 핸들러에 전달합니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(
///     AuthUser(user): AuthUser,
/// ) -> impl IntoResponse {
///     format!("Authenticated user: {}", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthHeaderError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.auth.current_identity(token)?;
        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/notices");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        let parts = parts_with_header(None);
        assert!(matches!(
            bearer_token(&parts),
            Err(AuthHeaderError::MissingToken)
        ));
    }

    #[test]
    fn test_non_bearer_scheme() {
        let parts = parts_with_header(Some("Basic dXNlcjpwdw=="));
        assert!(matches!(
            bearer_token(&parts),
            Err(AuthHeaderError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn test_error_responses_are_unauthorized() {
        let errors = vec![
            AuthHeaderError::MissingToken,
            AuthHeaderError::InvalidAuthHeader,
            AuthHeaderError::TokenExpired,
            AuthHeaderError::InvalidToken,
            AuthHeaderError::ScopeMismatch,
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_token_error_mapping() {
        assert!(matches!(
            AuthHeaderError::from(TokenError::TokenExpired),
            AuthHeaderError::TokenExpired
        ));
        assert!(matches!(
            AuthHeaderError::from(TokenError::ScopeMismatch),
            AuthHeaderError::ScopeMismatch
        ));
        assert!(matches!(
            AuthHeaderError::from(TokenError::InvalidToken),
            AuthHeaderError::InvalidToken
        ));
    }
}
