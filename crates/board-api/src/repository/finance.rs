//! 환율 스냅샷 Repository.
//!
//! 통화쌍별 최신 환율 행만 대시보드에 노출합니다. 수집기는 외부
//! 시스템이며, 여기서는 읽기만 합니다.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

/// 환율 행 (통화 코드로 조인된 형태).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ExchangeRate {
    pub id: i64,
    /// 대상 통화 코드 (예: "KRW")
    pub currency_to: String,
    /// 기준 통화 코드 (예: "USD")
    pub currency_from: String,
    /// 전일 대비 등락 ("+" | "-")
    pub inc_dec: String,
    /// 전일 대비 등락률 (표시용 문자열)
    pub inc_dec_per: String,
    pub price: Decimal,
}

/// 환율 Repository.
pub struct FinanceRepository;

impl FinanceRepository {
    /// 통화쌍별 최신 환율 조회.
    ///
    /// (currency_to, currency_from) 그룹마다 id가 가장 큰 행 하나만
    /// 반환합니다.
    pub async fn latest_rates(pool: &PgPool) -> Result<Vec<ExchangeRate>, sqlx::Error> {
        let records = sqlx::query_as::<_, ExchangeRate>(
            r#"
            SELECT d.id,
                   a.currency AS currency_to,
                   b.currency AS currency_from,
                   d.inc_dec, d.inc_dec_per, d.price
            FROM currency_rates d
            JOIN currencies a ON d.currency_to = a.id
            JOIN currencies b ON d.currency_from = b.id
            JOIN (
                SELECT currency_to, currency_from, MAX(id) AS id
                FROM currency_rates
                GROUP BY currency_to, currency_from
            ) latest ON d.id = latest.id
            ORDER BY d.id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
