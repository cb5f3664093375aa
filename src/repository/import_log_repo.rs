// ==========================================
// 电缆仓储系统 - 导入审计仓储
// ==========================================
// 职责: 审计记录追加写入、(批次, 校验和) 存在性探测、近期记录查询
// 红线: 只追加, 不提供更新或删除接口
// ==========================================

use crate::domain::audit::ImportLogRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ImportLogRepository Trait
// ==========================================
#[async_trait]
pub trait ImportLogRepository: Send + Sync {
    /// 追加一条审计记录
    async fn insert(&self, record: &ImportLogRecord) -> RepositoryResult<()>;

    /// 探测该批次是否已处理过同一内容校验和的文件
    async fn exists_for_batch(
        &self,
        batch_number: &str,
        file_sha256: &str,
    ) -> RepositoryResult<bool>;

    /// 查询最近的审计记录（按创建时间倒序）
    async fn recent(&self, limit: usize) -> RepositoryResult<Vec<ImportLogRecord>>;
}

// ==========================================
// ImportLogRepositoryImpl
// ==========================================
pub struct ImportLogRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ImportLogRepositoryImpl {
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
impl ImportLogRepository for ImportLogRepositoryImpl {
    async fn insert(&self, record: &ImportLogRecord) -> RepositoryResult<()> {
        let errors_json = serde_json::to_string(&record.errors)?;
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO import_log (
                log_id, batch_number, file_name, file_sha256,
                total, inserted, duplicates_in_file, duplicates_in_store, invalid_rows,
                elapsed_ms, errors_json, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                record.log_id,
                record.batch_number,
                record.file_name,
                record.file_sha256,
                record.total as i64,
                record.inserted as i64,
                record.duplicates_in_file as i64,
                record.duplicates_in_store as i64,
                record.invalid_rows as i64,
                record.elapsed_ms,
                errors_json,
                record.created_at,
            ],
        )?;
        Ok(())
    }

    async fn exists_for_batch(
        &self,
        batch_number: &str,
        file_sha256: &str,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM import_log WHERE batch_number = ?1 AND file_sha256 = ?2",
            params![batch_number, file_sha256.trim().to_lowercase()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    async fn recent(&self, limit: usize) -> RepositoryResult<Vec<ImportLogRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT log_id, batch_number, file_name, file_sha256,
                   total, inserted, duplicates_in_file, duplicates_in_store, invalid_rows,
                   elapsed_ms, errors_json, created_at
            FROM import_log ORDER BY created_at DESC LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            let errors_json: String = row.get(10)?;
            Ok((
                ImportLogRecord {
                    log_id: row.get(0)?,
                    batch_number: row.get(1)?,
                    file_name: row.get(2)?,
                    file_sha256: row.get(3)?,
                    total: row.get::<_, i64>(4)? as usize,
                    inserted: row.get::<_, i64>(5)? as usize,
                    duplicates_in_file: row.get::<_, i64>(6)? as usize,
                    duplicates_in_store: row.get::<_, i64>(7)? as usize,
                    invalid_rows: row.get::<_, i64>(8)? as usize,
                    elapsed_ms: row.get(9)?,
                    errors: Vec::new(),
                    created_at: row.get::<_, DateTime<Utc>>(11)?,
                },
                errors_json,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (mut record, errors_json) = row?;
            record.errors = serde_json::from_str(&errors_json)?;
            records.push(record);
        }
        Ok(records)
    }
}
