// ==========================================
// 电缆仓储系统 - 库位仓储
// ==========================================
// 职责: 库位按编码查询, 不存在时创建
// ==========================================

use crate::domain::catalog::normalize_code;
use crate::domain::storage::StorageLocation;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// StorageLocationRepository Trait
// ==========================================
#[async_trait]
pub trait StorageLocationRepository: Send + Sync {
    /// 按编码查询库位, 不存在时创建
    ///
    /// # 参数
    /// - code: 库位编码（入库前 TRIM+UPPER）
    async fn get_or_create(&self, code: &str) -> RepositoryResult<StorageLocation>;
}

// ==========================================
// StorageLocationRepositoryImpl
// ==========================================
pub struct StorageLocationRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl StorageLocationRepositoryImpl {
    /// 从共享连接创建
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl StorageLocationRepository for StorageLocationRepositoryImpl {
    async fn get_or_create(&self, code: &str) -> RepositoryResult<StorageLocation> {
        let normalized = normalize_code(code);
        let conn = self.get_conn()?;

        // 先插入（已存在则忽略）, 再读取, 两步都在同一连接上
        conn.execute(
            "INSERT OR IGNORE INTO storage_location (code, name, created_at) VALUES (?1, '', ?2)",
            params![normalized, Utc::now()],
        )?;

        let location = conn.query_row(
            "SELECT code, name, created_at FROM storage_location WHERE code = ?1",
            params![normalized],
            |row| {
                Ok(StorageLocation {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get::<_, DateTime<Utc>>(2)?,
                })
            },
        )?;
        Ok(location)
    }
}
