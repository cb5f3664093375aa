// ==========================================
// 电缆仓储系统 - 导入层
// ==========================================
// 职责: 外部数据导入, 生成批次明细与审计记录
// 支持: CSV（固定三列: position / drum_code / length）
// ==========================================

// 模块声明
pub mod batch_importer_impl;
pub mod batch_importer_trait;
pub mod error;
pub mod file_parser;
pub mod row_validator;

// 重导出核心类型
pub use batch_importer_impl::{sha256_hex, BatchImporterImpl};
pub use error::{ImportError, ImportResult};
pub use file_parser::CsvParser;
pub use row_validator::RowValidator as RowValidatorImpl;

// 重导出 Trait 接口
pub use batch_importer_trait::{BatchImporter, FileParser, RowValidator};
