// ==========================================
// 多菜式餐单聚合系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供菜谱记录读取接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod record_fetcher;
pub mod sqlite_record_fetcher;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use record_fetcher::RecordFetcher;
pub use sqlite_record_fetcher::SqliteRecordFetcher;
