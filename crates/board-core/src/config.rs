//! 설정 관리.
//!
//! 애플리케이션 설정을 정의하고 로드합니다.
//!
//! 서버/데이터베이스 설정은 기본값을 가지지만, 인증 설정(서명 키, 알고리즘,
//! 토큰 TTL)은 프로세스 시작 시 반드시 존재해야 합니다. 누락된 값은 요청
//! 단계가 아니라 기동 단계에서 실패합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BoardError, BoardResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// CORS 허용 origin 목록 (비어 있으면 모든 origin 허용 - 개발 모드)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL
    #[serde(default)]
    pub url: String,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
    /// 유휴 타임아웃 (초)
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            connection_timeout_secs: 30,
            idle_timeout_secs: 300,
        }
    }
}

/// 인증 설정.
///
/// JWT 서명과 토큰 수명을 제어합니다. 전역 싱글톤 대신 이 구조체가
/// `TokenCodec`과 인증 서비스 생성자에 명시적으로 주입됩니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키
    pub secret_key: String,
    /// 서명 알고리즘 (HS256 | HS384 | HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Access Token 만료 시간 (분)
    pub access_token_expire_minutes: i64,
    /// Refresh Token 만료 시간 (시간)
    pub refresh_token_expire_hours: i64,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

/// 필수 환경변수를 읽습니다. 없으면 설정 에러를 반환합니다.
fn require_env(key: &str) -> BoardResult<String> {
    std::env::var(key).map_err(|_| BoardError::Config(format!("{} 환경변수가 필요합니다", key)))
}

impl AuthConfig {
    /// 환경변수에서 인증 설정을 로드합니다.
    ///
    /// # 환경변수
    ///
    /// - `SECRET_KEY`: JWT 서명 비밀 키 (필수)
    /// - `ALGORITHM`: 서명 알고리즘 (필수)
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES`: Access Token TTL (필수)
    /// - `REFRESH_TOKEN_EXPIRE_HOURS`: Refresh Token TTL (필수)
    pub fn from_env() -> BoardResult<Self> {
        let access_token_expire_minutes = require_env("ACCESS_TOKEN_EXPIRE_MINUTES")?
            .parse()
            .map_err(|_| {
                BoardError::Config("ACCESS_TOKEN_EXPIRE_MINUTES는 정수여야 합니다".to_string())
            })?;
        let refresh_token_expire_hours = require_env("REFRESH_TOKEN_EXPIRE_HOURS")?
            .parse()
            .map_err(|_| {
                BoardError::Config("REFRESH_TOKEN_EXPIRE_HOURS는 정수여야 합니다".to_string())
            })?;

        Ok(Self {
            secret_key: require_env("SECRET_KEY")?,
            algorithm: require_env("ALGORITHM")?,
            access_token_expire_minutes,
            refresh_token_expire_hours,
        })
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 환경 변수는 `BOARD` 접두사와 `__` 구분자를 사용해 파일 값을
    /// 오버라이드합니다 (예: `BOARD__SERVER__PORT=9000`).
    pub fn load<P: AsRef<Path>>(path: P) -> BoardResult<Self> {
        let builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("BOARD")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 환경변수만으로 설정을 로드합니다.
    ///
    /// # 환경변수
    ///
    /// - `API_HOST`, `API_PORT`: 서버 바인딩 주소 (기본값: 127.0.0.1:8000)
    /// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록 (선택)
    /// - `DATABASE_URL`: PostgreSQL 연결 URL (필수)
    /// - `DB_MAX_CONNECTIONS`: 최대 연결 수 (기본값: 10)
    /// - 인증 관련 변수는 [`AuthConfig::from_env`] 참고
    pub fn from_env() -> BoardResult<Self> {
        let mut server = ServerConfig::default();
        if let Ok(host) = std::env::var("API_HOST") {
            server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            server.port = port
                .parse()
                .map_err(|_| BoardError::Config("API_PORT는 정수여야 합니다".to_string()))?;
        }
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        let mut database = DatabaseConfig {
            url: require_env("DATABASE_URL")?,
            ..Default::default()
        };
        if let Ok(max) = std::env::var("DB_MAX_CONNECTIONS") {
            database.max_connections = max.parse().map_err(|_| {
                BoardError::Config("DB_MAX_CONNECTIONS는 정수여야 합니다".to_string())
            })?;
        }

        let config = Self {
            server,
            database,
            auth: AuthConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 유효성을 검사합니다.
    pub fn validate(&self) -> BoardResult<()> {
        if self.auth.secret_key.is_empty() {
            return Err(BoardError::Config(
                "auth.secret_key는 비어 있을 수 없습니다".to_string(),
            ));
        }
        if !matches!(self.auth.algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(BoardError::Config(format!(
                "지원하지 않는 서명 알고리즘: {}",
                self.auth.algorithm
            )));
        }
        if self.auth.access_token_expire_minutes <= 0 {
            return Err(BoardError::Config(
                "access_token_expire_minutes는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.auth.refresh_token_expire_hours <= 0 {
            return Err(BoardError::Config(
                "refresh_token_expire_hours는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.database.url.is_empty() {
            return Err(BoardError::Config(
                "database.url이 설정되지 않았습니다".to_string(),
            ));
        }
        Ok(())
    }

    /// 바인딩할 소켓 주소 문자열을 반환합니다.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/board".to_string(),
                ..Default::default()
            },
            auth: AuthConfig {
                secret_key: "test-secret".to_string(),
                algorithm: "HS256".to_string(),
                access_token_expire_minutes: 30,
                refresh_token_expire_hours: 24,
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
        assert_eq!(valid_config().bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = valid_config();
        config.auth.secret_key.clear();
        assert!(matches!(config.validate(), Err(BoardError::Config(_))));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let mut config = valid_config();
        config.auth.algorithm = "RS256".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let mut config = valid_config();
        config.auth.access_token_expire_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.auth.refresh_token_expire_hours = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_database_url_rejected() {
        let mut config = valid_config();
        config.database.url.clear();
        assert!(config.validate().is_err());
    }
}
