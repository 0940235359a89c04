//! 리소스 소유권 검사.
//!
//! 게시글/댓글처럼 작성자가 있는 리소스의 수정·삭제는 원작성자만 할 수
//! 있습니다. 모든 게시판 모듈의 변경 핸들러가 이 검사를 거칩니다.
//! 새 리소스 생성은 인증만 요구하며 소유권 검사 대상이 아닙니다.

use axum::{http::StatusCode, Json};

use crate::error::ApiErrorResponse;

/// 소유권 불일치 에러.
#[derive(Debug, thiserror::Error)]
#[error("작성자와 로그인한 사용자가 다릅니다")]
pub struct Forbidden;

impl From<Forbidden> for (StatusCode, Json<ApiErrorResponse>) {
    fn from(err: Forbidden) -> Self {
        (
            StatusCode::FORBIDDEN,
            Json(ApiErrorResponse::new("FORBIDDEN", err.to_string())),
        )
    }
}

/// 리소스 작성자와 현재 사용자가 일치하는지 확인합니다.
pub fn assert_owner(author_id: i64, current_user_id: i64) -> Result<(), Forbidden> {
    if author_id == current_user_id {
        Ok(())
    } else {
        Err(Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_passes() {
        assert!(assert_owner(5, 5).is_ok());
    }

    #[test]
    fn test_non_owner_rejected() {
        assert!(assert_owner(5, 7).is_err());
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let (status, body): (StatusCode, Json<ApiErrorResponse>) = Forbidden.into();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.code(), "FORBIDDEN");
    }
}
