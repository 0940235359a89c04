//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 모든 Repository는 static methods 패턴을 사용합니다.

pub mod faqs;
pub mod finance;
pub mod menus;
pub mod notices;
pub mod refresh_tokens;
pub mod stocks;
pub mod users;

pub use faqs::{FaqRecord, FaqRepository, NewFaq};
pub use finance::{ExchangeRate, FinanceRepository};
pub use menus::{MenuRecord, MenuRepository, SubMenuRecord};
pub use notices::{
    CommentRecord, NewComment, NewNotice, NoticeDetail, NoticeRepository, NoticeSummary,
    VoteCounts, VoteInput,
};
pub use refresh_tokens::{RefreshTokenRecord, RefreshTokenRepository};
pub use stocks::{NewStockPost, StockCategory, StockDetail, StockRepository, StockSummary};
pub use users::{NewUser, UpdateProfile, UserProfile, UserRecord, UserRepository};
