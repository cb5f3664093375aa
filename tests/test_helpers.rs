// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、基础目录数据、导入器组装
// ==========================================

#![allow(dead_code)]

use cable_batch_import::config::ConfigManager;
use cable_batch_import::db::{init_schema, open_sqlite_connection};
use cable_batch_import::domain::catalog::{CableModel, Drum};
use cable_batch_import::domain::types::Length;
use cable_batch_import::importer::{BatchImporterImpl, CsvParser, RowValidatorImpl};
use cable_batch_import::repository::{
    BatchRepositoryImpl, DrumCatalogRepository, DrumCatalogRepositoryImpl,
    ImportLogRepositoryImpl, StorageLocationRepository, StorageLocationRepositoryImpl,
};
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 测试用导入器具体类型
pub type TestImporter = BatchImporterImpl<
    DrumCatalogRepositoryImpl,
    StorageLocationRepositoryImpl,
    BatchRepositoryImpl,
    ImportLogRepositoryImpl,
    ConfigManager,
>;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - Arc<Mutex<Connection>>: 共享连接
pub fn create_test_db() -> Result<(NamedTempFile, Arc<Mutex<Connection>>), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, Arc::new(Mutex::new(conn))))
}

/// 组装完整的导入器（全部仓储共享同一连接）
pub fn build_importer(conn: Arc<Mutex<Connection>>) -> Result<TestImporter, Box<dyn Error>> {
    Ok(BatchImporterImpl::new(
        DrumCatalogRepositoryImpl::new(conn.clone()),
        StorageLocationRepositoryImpl::new(conn.clone()),
        BatchRepositoryImpl::new(conn.clone()),
        ImportLogRepositoryImpl::new(conn.clone()),
        ConfigManager::from_connection(conn)?,
        Box::new(CsvParser),
        Box::new(RowValidatorImpl),
    ))
}

/// 写入基础目录数据（库位 / 电缆型号 / 盘具）
///
/// 盘具容量: DRUM-001=1000m, DRUM-002=800m, DRUM-003=600m,
///           DRUM-004=400m, DRUM-005=200m
pub async fn seed_basic_catalog(conn: Arc<Mutex<Connection>>) -> Result<(), Box<dyn Error>> {
    let storage_repo = StorageLocationRepositoryImpl::new(conn.clone());
    for code in ["S-1", "S-2", "S-3"] {
        storage_repo.get_or_create(code).await?;
    }

    let catalog_repo = DrumCatalogRepositoryImpl::new(conn);

    let models = [
        ("CM-OPT-01", "光缆 24F", 10, 1200),
        ("CM-OPT-02", "光缆 12F", 10, 900),
        ("CM-OPT-03", "光缆 8F", 10, 700),
        ("CM-OPT-04", "光缆 4F", 10, 300),
    ];
    for (code, name, min_m, max_m) in models {
        catalog_repo
            .insert_cable_model(&CableModel::new(
                code,
                name,
                Length::from_meters(min_m),
                Length::from_meters(max_m),
            ))
            .await?;
    }

    let drums = [
        ("DRUM-001", "CM-OPT-01", 1000),
        ("DRUM-002", "CM-OPT-02", 800),
        ("DRUM-003", "CM-OPT-03", 600),
        ("DRUM-004", "CM-OPT-03", 400),
        ("DRUM-005", "CM-OPT-04", 200),
    ];
    for (code, model_code, initial_m) in drums {
        catalog_repo
            .insert_drum(&Drum::new(code, model_code, Length::from_meters(initial_m)))
            .await?;
    }

    Ok(())
}
