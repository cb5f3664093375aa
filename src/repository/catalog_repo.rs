// ==========================================
// 电缆仓储系统 - 目录仓储
// ==========================================
// 职责: 电缆型号与盘具的数据访问
// 红线: Repository 不含业务规则, 只做数据 CRUD;
//       盘具界值校验委托给领域层 Drum::validate_against
// ==========================================

use crate::domain::catalog::{normalize_code, CableModel, Drum};
use crate::domain::types::Length;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// DrumCatalogRepository Trait
// ==========================================
// 用途: 导入引擎的目录查询入口（只读）+ 目录维护入口
// 实现者: DrumCatalogRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait DrumCatalogRepository: Send + Sync {
    /// 批量按编码查询盘具
    ///
    /// # 参数
    /// - codes: 盘具编码列表（调用前已 TRIM+UPPER）
    ///
    /// # 返回
    /// - Ok(HashMap<编码, Drum>): 命中的盘具; 未命中的编码不在映射中
    async fn find_drums_by_codes(
        &self,
        codes: &[String],
    ) -> RepositoryResult<HashMap<String, Drum>>;

    /// 按编码查询单个盘具
    async fn find_drum(&self, code: &str) -> RepositoryResult<Option<Drum>>;

    /// 插入电缆型号
    async fn insert_cable_model(&self, model: &CableModel) -> RepositoryResult<()>;

    /// 插入盘具
    ///
    /// 初始长度必须落在所属型号的 [min, max] 区间内,
    /// 否则返回 ValidationError
    async fn insert_drum(&self, drum: &Drum) -> RepositoryResult<()>;
}

// ==========================================
// DrumCatalogRepositoryImpl
// ==========================================
pub struct DrumCatalogRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl DrumCatalogRepositoryImpl {
    /// 从共享连接创建
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_drum(row: &Row<'_>) -> rusqlite::Result<Drum> {
        Ok(Drum {
            code: row.get(0)?,
            cable_model_code: row.get(1)?,
            initial_length: Length::from_centimeters(row.get(2)?),
            created_at: row.get::<_, DateTime<Utc>>(3)?,
            updated_at: row.get::<_, DateTime<Utc>>(4)?,
        })
    }

    fn find_model(conn: &Connection, code: &str) -> RepositoryResult<Option<CableModel>> {
        let mut stmt = conn.prepare(
            "SELECT code, name, min_length_cm, max_length_cm, created_at, updated_at
             FROM cable_model WHERE code = ?1",
        )?;
        let mut rows = stmt.query(params![code])?;
        match rows.next()? {
            Some(row) => Ok(Some(CableModel {
                code: row.get(0)?,
                name: row.get(1)?,
                min_length: Length::from_centimeters(row.get(2)?),
                max_length: Length::from_centimeters(row.get(3)?),
                created_at: row.get::<_, DateTime<Utc>>(4)?,
                updated_at: row.get::<_, DateTime<Utc>>(5)?,
            })),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl DrumCatalogRepository for DrumCatalogRepositoryImpl {
    async fn find_drums_by_codes(
        &self,
        codes: &[String],
    ) -> RepositoryResult<HashMap<String, Drum>> {
        let conn = self.get_conn()?;

        let mut found = HashMap::new();
        if codes.is_empty() {
            return Ok(found);
        }

        // IN (...) 占位符按编码数量拼接, 值全部参数化
        let placeholders = vec!["?"; codes.len()].join(", ");
        let sql = format!(
            "SELECT code, cable_model_code, initial_length_cm, created_at, updated_at
             FROM drum WHERE code IN ({})",
            placeholders
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(codes.iter()), |row| {
            Self::row_to_drum(row)
        })?;

        for drum in rows {
            let drum = drum?;
            found.insert(drum.code.clone(), drum);
        }
        Ok(found)
    }

    async fn find_drum(&self, code: &str) -> RepositoryResult<Option<Drum>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT code, cable_model_code, initial_length_cm, created_at, updated_at
             FROM drum WHERE code = ?1",
        )?;
        let mut rows = stmt.query(params![normalize_code(code)])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_drum(row)?)),
            None => Ok(None),
        }
    }

    async fn insert_cable_model(&self, model: &CableModel) -> RepositoryResult<()> {
        if !model.bounds_valid() {
            return Err(RepositoryError::ValidationError(format!(
                "型号 '{}' 长度范围非法: {}–{} 米。",
                model.code, model.min_length, model.max_length
            )));
        }

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cable_model (code, name, min_length_cm, max_length_cm, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                model.code,
                model.name,
                model.min_length.centimeters(),
                model.max_length.centimeters(),
                model.created_at,
                model.updated_at,
            ],
        )?;
        Ok(())
    }

    async fn insert_drum(&self, drum: &Drum) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let model = Self::find_model(&conn, &drum.cable_model_code)?.ok_or_else(|| {
            RepositoryError::NotFound {
                entity: "CableModel".to_string(),
                id: drum.cable_model_code.clone(),
            }
        })?;
        drum.validate_against(&model)
            .map_err(RepositoryError::ValidationError)?;

        conn.execute(
            r#"
            INSERT INTO drum (code, cable_model_code, initial_length_cm, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                drum.code,
                drum.cable_model_code,
                drum.initial_length.centimeters(),
                drum.created_at,
                drum.updated_at,
            ],
        )?;
        Ok(())
    }
}
