// ==========================================
// 电缆仓储系统 - 批次仓储
// ==========================================
// 职责: 批次 get_or_create、既有位置查询、明细事务化落库
// 红线: Repository 不含业务规则, 只做数据 CRUD
// 落库策略: INSERT OR IGNORE —— 提交时与唯一约束
//           (batch_id, position) 冲突的行静默跳过,
//           inserted 只统计真实写入的行
// ==========================================

use crate::domain::inventory::{Batch, BatchItem};
use crate::domain::types::Length;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// BatchRepository Trait
// ==========================================
// 用途: 导入引擎的批次/明细数据访问
// 实现者: BatchRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// 按编号查询批次, 不存在时创建
    async fn get_or_create(&self, number: &str) -> RepositoryResult<Batch>;

    /// 查询批次内已存在的全部位置
    async fn existing_positions(&self, batch_id: &str) -> RepositoryResult<HashSet<i64>>;

    /// 事务化批量插入明细
    ///
    /// # 返回
    /// - Ok(usize): 真实写入的行数; 与既有 (batch_id, position)
    ///   冲突的行被静默跳过, 不计入返回值, 也不使事务失败
    async fn insert_items(&self, items: &[BatchItem]) -> RepositoryResult<usize>;

    /// 查询批次全部明细（按位置升序）
    async fn list_items(&self, batch_id: &str) -> RepositoryResult<Vec<BatchItem>>;

    /// 统计批次明细数
    async fn count_items(&self, batch_id: &str) -> RepositoryResult<usize>;
}

// ==========================================
// BatchRepositoryImpl
// ==========================================
pub struct BatchRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl BatchRepositoryImpl {
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
impl BatchRepository for BatchRepositoryImpl {
    async fn get_or_create(&self, number: &str) -> RepositoryResult<Batch> {
        let conn = self.get_conn()?;

        let candidate = Batch::new(number);
        conn.execute(
            "INSERT OR IGNORE INTO batch (batch_id, number, created_at) VALUES (?1, ?2, ?3)",
            params![candidate.batch_id, candidate.number, candidate.created_at],
        )?;

        let batch = conn.query_row(
            "SELECT batch_id, number, created_at FROM batch WHERE number = ?1",
            params![number],
            |row| {
                Ok(Batch {
                    batch_id: row.get(0)?,
                    number: row.get(1)?,
                    created_at: row.get::<_, DateTime<Utc>>(2)?,
                })
            },
        )?;
        Ok(batch)
    }

    async fn existing_positions(&self, batch_id: &str) -> RepositoryResult<HashSet<i64>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT position FROM batch_item WHERE batch_id = ?1")?;
        let rows = stmt.query_map(params![batch_id], |row| row.get::<_, i64>(0))?;

        let mut positions = HashSet::new();
        for position in rows {
            positions.insert(position?);
        }
        Ok(positions)
    }

    async fn insert_items(&self, items: &[BatchItem]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO batch_item (
                    item_id, batch_id, drum_code, storage_code, position, length_cm, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )?;

            for item in items {
                // execute 返回真实变更行数; OR IGNORE 跳过时为 0
                inserted += stmt.execute(params![
                    item.item_id,
                    item.batch_id,
                    item.drum_code,
                    item.storage_code,
                    item.position,
                    item.length.centimeters(),
                    item.created_at,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(inserted)
    }

    async fn list_items(&self, batch_id: &str) -> RepositoryResult<Vec<BatchItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT item_id, batch_id, drum_code, storage_code, position, length_cm, created_at
            FROM batch_item WHERE batch_id = ?1 ORDER BY position ASC
            "#,
        )?;
        let rows = stmt.query_map(params![batch_id], |row| {
            Ok(BatchItem {
                item_id: row.get(0)?,
                batch_id: row.get(1)?,
                drum_code: row.get(2)?,
                storage_code: row.get(3)?,
                position: row.get(4)?,
                length: Length::from_centimeters(row.get(5)?),
                created_at: row.get::<_, DateTime<Utc>>(6)?,
            })
        })?;

        let mut items = Vec::new();
        for item in rows {
            items.push(item?);
        }
        Ok(items)
    }

    async fn count_items(&self, batch_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM batch_item WHERE batch_id = ?1",
            params![batch_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
