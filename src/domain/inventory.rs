// ==========================================
// 电缆仓储系统 - 批次领域模型
// ==========================================
// 用途: 批次与批次明细实体, 以及导入管道的中间结构
// 约束: (batch_id, position) 唯一; position > 0;
//       0 < length ≤ min(1,000,000, 盘具初始长度)
// ==========================================

use crate::domain::types::Length;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Batch - 批次
// ==========================================
// 以唯一编号标识; 首次引用时创建
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub batch_id: String, // 批次 ID（UUID）
    pub number: String,   // 批次编号（唯一，人工可读）
    pub created_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(number: &str) -> Self {
        Self {
            batch_id: Uuid::new_v4().to_string(),
            number: number.to_string(),
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// BatchItem - 批次明细
// ==========================================
// 一条被接受的导入行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub item_id: String,      // 明细 ID（UUID）
    pub batch_id: String,     // 所属批次
    pub drum_code: String,    // 盘具编码
    pub storage_code: String, // 库位编码
    pub position: i64,        // 批次内位置（> 0）
    pub length: Length,       // 长度（米，两位小数）
    pub created_at: DateTime<Utc>,
}

impl BatchItem {
    pub fn new(
        batch_id: &str,
        drum_code: &str,
        storage_code: &str,
        position: i64,
        length: Length,
    ) -> Self {
        Self {
            item_id: Uuid::new_v4().to_string(),
            batch_id: batch_id.to_string(),
            drum_code: drum_code.to_string(),
            storage_code: storage_code.to_string(),
            position,
            length,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// RawBatchRow - 解析阶段产物
// ==========================================
// 三个必需列的原始字符串值; line_no 为文件内 1 基行号
// （表头占第 1 行，数据从第 2 行起）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBatchRow {
    pub line_no: usize,
    pub position: String,
    pub drum_code: String,
    pub length: String,
}

// ==========================================
// CandidateRow - 第一阶段校验通过的候选行
// ==========================================
// 字段已规范化并完成类型转换; 第二阶段做目录引用与查重
#[derive(Debug, Clone)]
pub struct CandidateRow {
    pub line_no: usize,
    pub drum_code: String, // TRIM+UPPER 后的盘具编码
    pub position: i64,     // 已校验为正整数
    pub length: Length,    // 已归整到两位小数
}

// ==========================================
// BatchImportOutcome - 导入结果
// ==========================================
// 与审计记录的计数一致; errors 为完整错误列表（不截断）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchImportOutcome {
    pub total: usize,               // 文件数据行总数
    pub inserted: usize,            // 实际落库行数
    pub duplicates_in_file: usize,  // 文件内位置重复行数
    pub duplicates_in_store: usize, // 与库内既有位置重复行数
    pub invalid_rows: usize,        // 无效行数
    pub errors: Vec<String>,        // 按行序累积的错误文本
    pub batch_id: String,           // 批次 ID
    pub file_name: String,          // 源文件名
    pub file_sha256: String,        // 文件内容 SHA-256
}
