// ==========================================
// 电缆仓储系统 - 领域层
// ==========================================
// 职责: 实体与值类型定义, 不含数据访问
// ==========================================

pub mod audit;
pub mod catalog;
pub mod inventory;
pub mod storage;
pub mod types;

// 重导出核心实体
pub use audit::ImportLogRecord;
pub use catalog::{normalize_code, CableModel, Drum};
pub use inventory::{Batch, BatchImportOutcome, BatchItem, CandidateRow, RawBatchRow};
pub use storage::{StorageLocation, StorageRef};
pub use types::Length;
