// ==========================================
// 电缆仓储系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::configure_sqlite_connection;
use crate::domain::types::Length;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 配置键: 错误率熔断阈值
pub const KEY_ERROR_RATIO_THRESHOLD: &str = "import/error_ratio_threshold";
/// 配置键: 审计错误条数上限
pub const KEY_ERROR_LOG_CAP: &str = "import/error_log_cap";
/// 配置键: 单行长度硬上限（米）
pub const KEY_MAX_IMPORT_LENGTH_M: &str = "import/max_length_m";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置值（测试与运维入口）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_error_ratio_threshold(&self) -> RepositoryResult<f64> {
        let raw = self.get_config_or_default(KEY_ERROR_RATIO_THRESHOLD, "0.5")?;
        raw.parse::<f64>().map_err(|e| {
            RepositoryError::ValidationError(format!(
                "配置 {} 值 '{}' 无法解析: {}",
                KEY_ERROR_RATIO_THRESHOLD, raw, e
            ))
        })
    }

    async fn get_error_log_cap(&self) -> RepositoryResult<usize> {
        let raw = self.get_config_or_default(KEY_ERROR_LOG_CAP, "100")?;
        raw.parse::<usize>().map_err(|e| {
            RepositoryError::ValidationError(format!(
                "配置 {} 值 '{}' 无法解析: {}",
                KEY_ERROR_LOG_CAP, raw, e
            ))
        })
    }

    async fn get_max_import_length(&self) -> RepositoryResult<Length> {
        let raw = self.get_config_or_default(KEY_MAX_IMPORT_LENGTH_M, "1000000.00")?;
        Length::parse(&raw).ok_or_else(|| {
            RepositoryError::ValidationError(format!(
                "配置 {} 值 '{}' 无法解析为长度",
                KEY_MAX_IMPORT_LENGTH_M, raw
            ))
        })
    }
}
