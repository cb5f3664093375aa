// ==========================================
// 电缆仓储系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================
// 整体中止类错误（结构缺陷/文件重放/错误率熔断）在
// 返回调用方之前均已写入审计记录; 行级缺陷不在此列,
// 只体现为结果计数与错误文本
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 结构性失败（整体中止, total = 0）=====
    #[error("文件不是有效的 UTF-8 文本: {0}")]
    InvalidEncoding(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("缺少必需列: {0}")]
    MissingColumns(String),

    #[error("文件不包含数据行。")]
    EmptyFile,

    // ===== 文件重放（整体中止, 全部行计为库内重复）=====
    #[error("该文件（相同内容校验和）已在此批次导入过。")]
    DuplicateFile,

    // ===== 错误率熔断（整体中止, inserted = 0）=====
    #[error("文件质量错误占比 {quality_errors}/{total} 超过阈值 {threshold}，导入已取消。")]
    ErrorRatioExceeded {
        quality_errors: usize,
        total: usize,
        threshold: f64,
    },

    // ===== 基础设施错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
