// ==========================================
// 电缆仓储系统 - 批次导入 Trait
// ==========================================
// 职责: 定义批次导入接口与管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::inventory::{BatchImportOutcome, CandidateRow, RawBatchRow};
use crate::domain::storage::StorageRef;
use crate::domain::types::Length;
use crate::importer::error::ImportError;
use async_trait::async_trait;

// ==========================================
// BatchImporter Trait
// ==========================================
// 用途: 批次导入主接口
// 实现者: BatchImporterImpl
#[async_trait]
pub trait BatchImporter: Send + Sync {
    /// 导入一份批次明细文件
    ///
    /// # 参数
    /// - file_bytes: 上传文件原始字节
    /// - file_name: 展示用文件名
    /// - batch_number: 批次编号（不存在时创建）
    /// - storage: 目标库位（实体或编码, 编码按需创建）
    ///
    /// # 返回
    /// - Ok(BatchImportOutcome): 导入结果（计数 + 完整错误列表）
    /// - Err(ImportError): 整体中止（结构缺陷/重放/熔断/基础设施错误）
    ///
    /// # 导入流程
    /// 1. 计算文件 SHA-256 指纹
    /// 2. 解析并校验表头（position / drum_code / length）
    /// 3. 文件重放检查（批次 + 指纹）
    /// 4. 第一阶段: 逐行结构校验
    /// 5. 批量目录查询
    /// 6. 第二阶段: 引用校验与查重（文件内/库内）
    /// 7. 错误率熔断判定
    /// 8. 事务化落库（唯一冲突静默跳过）
    /// 9. 审计记录写入（任何终态恰好一条）
    async fn import_batch(
        &self,
        file_bytes: &[u8],
        file_name: &str,
        batch_number: &str,
        storage: StorageRef,
    ) -> Result<BatchImportOutcome, ImportError>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件字节为原始行记录
    ///
    /// # 返回
    /// - Ok(Vec<RawBatchRow>): 三个必需列的原始字符串值, 按文件行序
    /// - Err(ImportError): 编码错误 / 表头缺列 / CSV 结构错误
    fn parse(&self, file_bytes: &[u8]) -> Result<Vec<RawBatchRow>, ImportError>;
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 第一阶段逐行结构校验（纯函数, 不访问数据库）
// 实现者: RowValidator
pub trait RowValidator: Send + Sync {
    /// 校验单行并完成类型转换
    ///
    /// 校验顺序: drum_code → length → position,
    /// 首个失败字段即判定该行无效（一行只计一次无效）
    ///
    /// # 返回
    /// - Ok(CandidateRow): 三项检查全部通过
    /// - Err(String): 含行号的错误文本
    fn validate(&self, row: &RawBatchRow, max_length: Length) -> Result<CandidateRow, String>;
}
