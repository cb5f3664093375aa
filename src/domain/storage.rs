// ==========================================
// 电缆仓储系统 - 库位领域模型
// ==========================================
// 用途: 导入运行的目标库位; 编码唯一, 按需创建
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// StorageLocation - 库位
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageLocation {
    pub code: String, // 库位编码（唯一，TRIM+UPPER 入库）
    pub name: String, // 库位名称
    pub created_at: DateTime<Utc>,
}

// ==========================================
// StorageRef - 库位输入（多态）
// ==========================================
// 调用方既可以传入已解析好的库位实体,
// 也可以只给编码、由引擎查询或创建;
// 管道开始前统一解析为具体的 StorageLocation
#[derive(Debug, Clone)]
pub enum StorageRef {
    /// 已解析的库位实体
    Resolved(StorageLocation),
    /// 库位编码，按需 get_or_create
    Code(String),
}

impl From<&str> for StorageRef {
    fn from(code: &str) -> Self {
        StorageRef::Code(code.to_string())
    }
}

impl From<StorageLocation> for StorageRef {
    fn from(location: StorageLocation) -> Self {
        StorageRef::Resolved(location)
    }
}
