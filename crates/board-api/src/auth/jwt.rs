//! JWT 토큰 처리.
//!
//! Access Token 및 Refresh Token 생성/검증 로직.
//!
//! 두 토큰은 페이로드 내부의 `scope` 클레임으로 구분되며 서로 교환될 수
//! 없습니다. refresh 토큰은 access 토큰 재발급에만 사용됩니다. 서명 키와
//! TTL은 [`AuthConfig`]에서 한 번 주입되고, 전역 상태는 없습니다.

use board_core::config::AuthConfig;
use board_core::error::BoardError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 토큰 용도 구분.
///
/// 페이로드에 그대로 직렬화됩니다. access 토큰이 기대되는 곳에서 refresh
/// 토큰이 통과하면 안 되므로, 디코딩 시 반드시 기대 scope와 비교합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenScope {
    /// API 호출을 승인하는 단기 토큰
    #[serde(rename = "access_token")]
    Access,
    /// Access Token 재발급 전용 장기 토큰
    #[serde(rename = "refresh_token")]
    Refresh,
}

impl std::fmt::Display for TokenScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenScope::Access => write!(f, "access_token"),
            TokenScope::Refresh => write!(f, "refresh_token"),
        }
    }
}

/// JWT 페이로드.
///
/// 최소 클레임만 담습니다. `is_active`/`is_staff` 같은 권한 플래그는
/// 토큰에 포함하지 않고 필요할 때 저장소에서 다시 읽습니다. 토큰 발급
/// 시점의 스냅샷이 낡는 문제를 피하는 대신 요청당 조회 한 번을 지불합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 이름
    pub sub: String,
    /// 사용자 ID
    pub user_id: i64,
    /// 토큰 용도
    pub scope: TokenScope,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// Access Token + Refresh Token 페어.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    /// Access Token
    pub access_token: String,
    /// Refresh Token
    pub refresh_token: String,
}

/// JWT 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("토큰 scope가 올바르지 않습니다")]
    ScopeMismatch,
}

/// JWT 인코더/디코더.
///
/// 프로세스 시작 시 [`AuthConfig`]로 한 번 생성되어 인증 서비스와
/// 추출기에 공유됩니다.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// 인증 설정에서 코덱을 생성합니다.
    ///
    /// 알고리즘 문자열이 HMAC 계열이 아니면 설정 에러를 반환합니다.
    pub fn new(config: &AuthConfig) -> Result<Self, BoardError> {
        let algorithm = match config.algorithm.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                return Err(BoardError::Config(format!(
                    "지원하지 않는 서명 알고리즘: {}",
                    other
                )))
            }
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            algorithm,
            access_ttl: Duration::minutes(config.access_token_expire_minutes),
            refresh_ttl: Duration::hours(config.refresh_token_expire_hours),
        })
    }

    fn issue(
        &self,
        username: &str,
        user_id: i64,
        scope: TokenScope,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            user_id,
            scope,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(TokenError::from)
    }

    /// Access Token 발급.
    pub fn issue_access(&self, username: &str, user_id: i64) -> Result<String, TokenError> {
        self.issue(username, user_id, TokenScope::Access, self.access_ttl)
    }

    /// Refresh Token 발급.
    pub fn issue_refresh(&self, username: &str, user_id: i64) -> Result<String, TokenError> {
        self.issue(username, user_id, TokenScope::Refresh, self.refresh_ttl)
    }

    /// Access + Refresh 토큰 쌍 발급.
    pub fn issue_pair(&self, username: &str, user_id: i64) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(username, user_id)?,
            refresh_token: self.issue_refresh(username, user_id)?,
        })
    }

    /// 토큰 디코딩 및 검증.
    ///
    /// 서명과 만료를 검증한 뒤 `expected_scope`와 페이로드의 scope를
    /// 비교합니다. 만료(`TokenExpired`)와 형식/서명 불량(`InvalidToken`)은
    /// 내부적으로 구분되며, scope 불일치는 `ScopeMismatch`입니다.
    pub fn decode(&self, token: &str, expected_scope: TokenScope) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            }
        })?;

        if data.claims.scope != expected_scope {
            return Err(TokenError::ScopeMismatch);
        }

        Ok(data.claims)
    }

    /// Refresh Token으로 새 Access Token 발급.
    ///
    /// refresh scope로 디코딩한 뒤 같은 subject로 새 `iat`/`exp`를 가진
    /// access 토큰을 발급합니다. refresh 토큰 자체는 회전하지 않습니다.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.decode(refresh_token, TokenScope::Refresh)?;
        self.issue(&claims.sub, claims.user_id, TokenScope::Access, self.access_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret_key: "test-secret-key-for-jwt-testing-minimum-32-chars".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_hours: 24,
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(&test_config()).unwrap()
    }

    #[test]
    fn test_issue_and_decode_access_token() {
        let codec = codec();
        let token = codec.issue_access("alice", 7).unwrap();

        let claims = codec.decode(&token, TokenScope::Access).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.scope, TokenScope::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let codec = codec();
        let token = codec.issue_access("alice", 7).unwrap();

        let result = codec.decode(&token, TokenScope::Refresh);
        assert!(matches!(result, Err(TokenError::ScopeMismatch)));
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let codec = codec();
        let token = codec.issue_refresh("alice", 7).unwrap();

        let result = codec.decode(&token, TokenScope::Access);
        assert!(matches!(result, Err(TokenError::ScopeMismatch)));
    }

    #[test]
    fn test_expired_token() {
        // 만료 시간이 과거인 코덱으로 발급
        let config = AuthConfig {
            access_token_expire_minutes: -5,
            ..test_config()
        };
        let expired_codec = TokenCodec::new(&config).unwrap();
        let token = expired_codec.issue_access("alice", 7).unwrap();

        // 서명은 유효하지만 만료로 실패해야 함
        let result = codec().decode(&token, TokenScope::Access);
        assert!(matches!(result, Err(TokenError::TokenExpired)));
    }

    #[test]
    fn test_refresh_flow() {
        let codec = codec();
        let refresh_token = codec.issue_refresh("alice", 7).unwrap();

        let new_access = codec.refresh(&refresh_token).unwrap();
        let claims = codec.decode(&new_access, TokenScope::Access).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_id, 7);
    }

    #[test]
    fn test_refresh_rejects_access_token() {
        let codec = codec();
        let access_token = codec.issue_access("alice", 7).unwrap();

        let result = codec.refresh(&access_token);
        assert!(matches!(result, Err(TokenError::ScopeMismatch)));
    }

    #[test]
    fn test_garbage_token_invalid() {
        let result = codec().decode("invalid.token.here", TokenScope::Access);
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_invalid() {
        let token = codec().issue_access("alice", 7).unwrap();

        let other = TokenCodec::new(&AuthConfig {
            secret_key: "another-secret-key-for-testing-minimum-32-chars".to_string(),
            ..test_config()
        })
        .unwrap();

        let result = other.decode(&token, TokenScope::Access);
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        let config = AuthConfig {
            algorithm: "RS256".to_string(),
            ..test_config()
        };
        assert!(TokenCodec::new(&config).is_err());
    }

    #[test]
    fn test_issue_pair() {
        let codec = codec();
        let pair = codec.issue_pair("alice", 7).unwrap();

        assert_eq!(
            codec
                .decode(&pair.access_token, TokenScope::Access)
                .unwrap()
                .sub,
            "alice"
        );
        assert_eq!(
            codec
                .decode(&pair.refresh_token, TokenScope::Refresh)
                .unwrap()
                .sub,
            "alice"
        );
    }
}
