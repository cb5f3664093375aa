// ==========================================
// 电缆仓储系统 - 批次导入核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 批次导入与校验引擎
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::Length;

// 领域实体
pub use domain::{
    Batch, BatchImportOutcome, BatchItem, CableModel, Drum, ImportLogRecord, StorageLocation,
    StorageRef,
};

// 导入引擎
pub use importer::{BatchImporter, BatchImporterImpl, ImportError};

// 仓储接口
pub use repository::{
    BatchRepository, DrumCatalogRepository, ImportLogRepository, StorageLocationRepository,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "电缆仓储批次导入系统";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
