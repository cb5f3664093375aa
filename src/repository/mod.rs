// ==========================================
// 电缆仓储系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口, 屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化, 防止 SQL 注入
// ==========================================

pub mod batch_repo;
pub mod catalog_repo;
pub mod error;
pub mod import_log_repo;
pub mod storage_repo;

// 重导出核心仓储
pub use batch_repo::{BatchRepository, BatchRepositoryImpl};
pub use catalog_repo::{DrumCatalogRepository, DrumCatalogRepositoryImpl};
pub use error::{RepositoryError, RepositoryResult};
pub use import_log_repo::{ImportLogRepository, ImportLogRepositoryImpl};
pub use storage_repo::{StorageLocationRepository, StorageLocationRepositoryImpl};
