//! 백엔드 공통 에러 타입.
//!
//! 이 모듈은 시스템 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 백엔드 에러.
#[derive(Debug, Error)]
pub enum BoardError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 인증 에러
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 백엔드 작업을 위한 Result 타입.
pub type BoardResult<T> = Result<T, BoardError>;

impl BoardError {
    /// 클라이언트 측 원인으로 발생한 에러인지 확인합니다.
    ///
    /// 4xx 계열로 응답해야 하는 에러는 true를 반환합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BoardError::Auth(_) | BoardError::InvalidInput(_) | BoardError::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for BoardError {
    fn from(err: config::ConfigError) -> Self {
        BoardError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(BoardError::Auth("토큰 없음".into()).is_client_error());
        assert!(BoardError::NotFound("notice 3".into()).is_client_error());
        assert!(!BoardError::Database("connection reset".into()).is_client_error());
        assert!(!BoardError::Config("SECRET_KEY".into()).is_client_error());
    }

    #[test]
    fn test_serde_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let converted: BoardError = err.into();
        assert!(matches!(converted, BoardError::Serialization(_)));
    }
}
