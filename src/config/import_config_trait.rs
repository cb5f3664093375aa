// ==========================================
// 电缆仓储系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::Length;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取错误率熔断阈值
    ///
    /// 质量错误占比严格大于该值时中止导入;
    /// 恰好等于阈值不触发
    ///
    /// # 默认值
    /// - 0.5
    async fn get_error_ratio_threshold(&self) -> RepositoryResult<f64>;

    /// 获取审计记录错误文本条数上限
    ///
    /// 超出上限的错误以一条汇总说明代替
    ///
    /// # 默认值
    /// - 100
    async fn get_error_log_cap(&self) -> RepositoryResult<usize>;

    /// 获取单行长度硬上限（米）
    ///
    /// # 默认值
    /// - 1,000,000.00
    async fn get_max_import_length(&self) -> RepositoryResult<Length>;
}
