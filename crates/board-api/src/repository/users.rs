//! 사용자 Repository.
//!
//! 회원 정보 관련 데이터베이스 연산을 담당합니다.
//!
//! `username`과 `email`은 삭제되지 않은 행 사이에서 전역 유일합니다.
//! 사용자 행은 하드 삭제하지 않고 `deleted_at` 타임스탬프로만 지웁니다.
//! 모든 조회는 `deleted_at IS NULL` 필터를 거칩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;
use validator::Validate;

// ================================================================================================
// Types
// ================================================================================================

/// 사용자 레코드.
///
/// `password_hash`를 포함하므로 직렬화하지 않습니다. 응답에는
/// [`UserProfile`]을 사용하세요.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zipcode: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    /// 비밀번호 재설정용 일회성 인증번호
    pub auth_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 사용자 프로필 응답.
///
/// 비밀번호 해시와 인증번호를 제외한 공개 가능한 필드만 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zipcode: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
}

impl From<UserRecord> for UserProfile {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            zipcode: record.zipcode,
            address1: record.address1,
            address2: record.address2,
            is_active: record.is_active,
            is_staff: record.is_staff,
        }
    }
}

/// 회원가입 입력.
///
/// `is_active`/`is_staff`는 입력으로 받지 않고 항상 false로 생성됩니다.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewUser {
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
}

/// 프로필 수정 입력.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
}

// ================================================================================================
// Repository
// ================================================================================================

/// 사용자 Repository.
pub struct UserRepository;

impl UserRepository {
    /// username으로 사용자 조회.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT * FROM users WHERE username = $1 AND deleted_at IS NULL",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// email로 사용자 조회.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 사용자 생성.
    ///
    /// `is_active`/`is_staff`는 테이블 기본값(false)으로 생성됩니다.
    /// username/email 유니크 제약 위반은 sqlx 에러로 그대로 반환되며,
    /// 호출 측(인증 서비스)에서 중복 가입 에러로 매핑합니다.
    pub async fn create(
        pool: &PgPool,
        input: &NewUser,
        password_hash: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users
                (username, email, password_hash, first_name, last_name, zipcode, address1, address2)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(password_hash)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.zipcode)
        .bind(&input.address1)
        .bind(&input.address2)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// 프로필 수정.
    pub async fn update_profile(
        pool: &PgPool,
        username: &str,
        input: &UpdateProfile,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, zipcode = $4,
                address1 = $5, address2 = $6, updated_at = NOW()
            WHERE username = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.zipcode)
        .bind(&input.address1)
        .bind(&input.address2)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 비밀번호 해시 갱신.
    pub async fn update_password(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE username = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// email + 인증번호 일치 확인.
    pub async fn find_by_email_and_code(
        pool: &PgPool,
        email: &str,
        code: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT * FROM users
            WHERE email = $1 AND auth_number = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .bind(code)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_excludes_secrets() {
        let record = UserRecord {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            first_name: None,
            last_name: None,
            zipcode: None,
            address1: None,
            address2: None,
            is_active: false,
            is_staff: false,
            auth_number: Some("123456".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        let profile = UserProfile::from(record);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("auth_number").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_new_user_validation() {
        let valid = NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "Password1".to_string(),
            first_name: None,
            last_name: None,
            zipcode: None,
            address1: None,
            address2: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = NewUser {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_name = NewUser {
            username: "ab".to_string(),
            ..valid
        };
        assert!(short_name.validate().is_err());
    }
}
