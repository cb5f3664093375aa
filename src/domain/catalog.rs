// ==========================================
// 电缆仓储系统 - 目录领域模型
// ==========================================
// 用途: 电缆型号与盘具目录,由目录维护方写入
// 红线: 导入引擎对目录只读
// ==========================================

use crate::domain::types::Length;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 规范化编码: TRIM + UPPER
///
/// 盘具编码、库位编码入库与查询前统一经过此函数
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// ==========================================
// CableModel - 电缆型号
// ==========================================
// 持有长度上下界; 盘具创建时校验初始长度落在界内
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableModel {
    pub code: String,           // 型号编码（唯一）
    pub name: String,           // 型号名称
    pub min_length: Length,     // 最小长度（米）
    pub max_length: Length,     // 最大长度（米）
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CableModel {
    pub fn new(code: &str, name: &str, min_length: Length, max_length: Length) -> Self {
        let now = Utc::now();
        Self {
            code: normalize_code(code),
            name: name.to_string(),
            min_length,
            max_length,
            created_at: now,
            updated_at: now,
        }
    }

    /// 上下界自洽: 0 < min ≤ max
    pub fn bounds_valid(&self) -> bool {
        self.min_length.is_positive() && self.min_length <= self.max_length
    }
}

// ==========================================
// Drum - 电缆盘具
// ==========================================
// initial_length 为盘具出厂的标称可用长度，
// 导入行的长度不得超过该值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drum {
    pub code: String,              // 盘具编码（唯一，TRIM+UPPER 入库）
    pub cable_model_code: String,  // 所属电缆型号编码
    pub initial_length: Length,    // 初始长度（米）
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Drum {
    pub fn new(code: &str, cable_model_code: &str, initial_length: Length) -> Self {
        let now = Utc::now();
        Self {
            code: normalize_code(code),
            cable_model_code: normalize_code(cable_model_code),
            initial_length,
            created_at: now,
            updated_at: now,
        }
    }

    /// 校验初始长度落在型号的 [min, max] 区间内
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(String): 违规说明（含型号界值）
    pub fn validate_against(&self, model: &CableModel) -> Result<(), String> {
        if !self.initial_length.is_positive() {
            return Err(format!("盘具 '{}' 初始长度必须大于 0。", self.code));
        }
        if self.initial_length < model.min_length || self.initial_length > model.max_length {
            return Err(format!(
                "盘具 '{}' 初始长度 {} 米超出型号 {} 的范围 {}–{} 米。",
                self.code, self.initial_length, model.code, model.min_length, model.max_length
            ));
        }
        Ok(())
    }
}
