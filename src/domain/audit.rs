// ==========================================
// 电缆仓储系统 - 审计领域模型
// ==========================================
// 用途: 每次导入调用（无论成败）恰好写入一条审计记录
// 红线: 追加型, 创建后永不更新、永不删除
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// ImportLogRecord - 导入审计记录
// ==========================================
// 以 (batch_number, file_sha256) 松散关联批次与文件内容,
// 同一对出现第二次即视为文件重放
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLogRecord {
    pub log_id: String,             // 记录 ID（UUID）
    pub batch_number: String,       // 批次编号
    pub file_name: String,          // 源文件名
    pub file_sha256: String,        // 文件内容 SHA-256（十六进制小写）
    pub total: usize,               // 读取的数据行总数
    pub inserted: usize,            // 落库行数
    pub duplicates_in_file: usize,  // 文件内重复行数
    pub duplicates_in_store: usize, // 库内重复行数
    pub invalid_rows: usize,        // 无效行数
    pub elapsed_ms: i64,            // 耗时（毫秒）
    pub errors: Vec<String>,        // 错误文本（已按上限截断）
    pub created_at: DateTime<Utc>,  // 记录创建时间
}

impl ImportLogRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        batch_number: &str,
        file_name: &str,
        file_sha256: &str,
        total: usize,
        inserted: usize,
        duplicates_in_file: usize,
        duplicates_in_store: usize,
        invalid_rows: usize,
        elapsed_ms: i64,
        errors: Vec<String>,
    ) -> Self {
        Self {
            log_id: Uuid::new_v4().to_string(),
            batch_number: batch_number.to_string(),
            file_name: file_name.to_string(),
            file_sha256: file_sha256.trim().to_lowercase(),
            total,
            inserted,
            duplicates_in_file,
            duplicates_in_store,
            invalid_rows,
            elapsed_ms,
            errors,
            created_at: Utc::now(),
        }
    }
}
