//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "USERNAME_TAKEN",
///   "message": "username already exists",
///   "details": null,
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "DB_ERROR", "INVALID_CREDENTIALS", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 에러 코드 반환.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 에러 메시지 반환.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
///
/// # Example
///
/// ```ignore
/// async fn get_notice(
///     Path(id): Path<i64>,
///     State(state): State<Arc<AppState>>,
/// ) -> ApiResult<Json<NoticeDetail>> {
///     let notice = NoticeRepository::get(&state.db_pool, id)
///         .await
///         .map_err(internal_error)?
///         .ok_or_else(|| not_found("Notice not found"))?;
///
///     Ok(Json(notice))
/// }
/// ```
pub type ApiResult<T> = Result<T, (axum::http::StatusCode, axum::Json<ApiErrorResponse>)>;

/// 데이터베이스 에러를 500 응답으로 변환합니다.
pub fn internal_error(err: sqlx::Error) -> (axum::http::StatusCode, axum::Json<ApiErrorResponse>) {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(ApiErrorResponse::new("DB_ERROR", err.to_string())),
    )
}

/// 404 응답을 생성합니다.
pub fn not_found(message: impl Into<String>) -> (axum::http::StatusCode, axum::Json<ApiErrorResponse>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(ApiErrorResponse::new("NOT_FOUND", message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_skips_empty_fields() {
        let error = ApiErrorResponse {
            code: "NOT_FOUND".to_string(),
            message: "Notice 3 not found".to_string(),
            details: None,
            timestamp: None,
        };

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("details").is_none());
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_with_details() {
        let error = ApiErrorResponse::with_details(
            "INVALID_INPUT",
            "validation failed",
            serde_json::json!({"field": "email"}),
        );
        assert_eq!(error.code(), "INVALID_INPUT");
        assert_eq!(error.details.unwrap()["field"], "email");
        assert!(error.timestamp.is_some());
    }
}
