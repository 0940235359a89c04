//! 공통 API 타입.
//!
//! 목록 엔드포인트에서 사용하는 페이지네이션 타입을 정의합니다.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// 페이지당 기본 아이템 수.
const DEFAULT_PAGE_SIZE: u32 = 20;
/// 페이지당 최대 아이템 수.
const MAX_PAGE_SIZE: u32 = 100;

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// 페이지네이션 쿼리 파라미터.
///
/// `?page=2&size=20` 형식. 페이지는 1부터 시작합니다.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageParams {
    /// 페이지 번호 (1부터 시작)
    #[serde(default = "default_page")]
    pub page: u32,
    /// 페이지당 아이템 수 (최대 100)
    #[serde(default = "default_size")]
    pub size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

impl PageParams {
    /// SQL LIMIT 값.
    pub fn limit(&self) -> i64 {
        self.size.clamp(1, MAX_PAGE_SIZE) as i64
    }

    /// SQL OFFSET 값.
    pub fn offset(&self) -> i64 {
        let page = self.page.max(1) as i64;
        (page - 1) * self.limit()
    }
}

/// 페이지네이션 응답 래퍼.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    /// 현재 페이지 아이템
    pub items: Vec<T>,
    /// 전체 아이템 수
    pub total: i64,
    /// 현재 페이지 번호
    pub page: u32,
    /// 페이지당 아이템 수
    pub size: u32,
}

impl<T> Page<T> {
    /// 조회 결과와 파라미터로 페이지 응답을 구성합니다.
    pub fn new(items: Vec<T>, total: i64, params: &PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page.max(1),
            size: params.size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = PageParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_calculation() {
        let params = PageParams { page: 3, size: 10 };
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_size_clamped() {
        let params = PageParams { page: 1, size: 500 };
        assert_eq!(params.limit(), 100);

        let params = PageParams { page: 1, size: 0 };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_zero_page_treated_as_first() {
        let params = PageParams { page: 0, size: 10 };
        assert_eq!(params.offset(), 0);

        let page = Page::new(vec![1, 2, 3], 3, &params);
        assert_eq!(page.page, 1);
    }
}
