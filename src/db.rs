// ==========================================
// 电缆仓储系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供建库入口 init_schema（目录/库位/批次/导入日志全部表）
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 表的归属：
/// - cable_model / drum: 目录，由目录维护方写入，本引擎只读
/// - storage_location / batch: 按需 get_or_create
/// - batch_item: 引擎唯一写入方，(batch_id, position) 唯一
/// - import_log: 追加型审计记录，引擎每次调用恰好写入一条
/// - config_kv: 配置键值表（scope_id = 'global'）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS cable_model (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL DEFAULT '',
            min_length_cm INTEGER NOT NULL CHECK (min_length_cm > 0),
            max_length_cm INTEGER NOT NULL CHECK (max_length_cm > 0),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK (max_length_cm >= min_length_cm)
        );

        CREATE TABLE IF NOT EXISTS drum (
            code TEXT PRIMARY KEY,
            cable_model_code TEXT NOT NULL REFERENCES cable_model(code),
            initial_length_cm INTEGER NOT NULL CHECK (initial_length_cm > 0),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS storage_location (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS batch (
            batch_id TEXT PRIMARY KEY,
            number TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS batch_item (
            item_id TEXT PRIMARY KEY,
            batch_id TEXT NOT NULL REFERENCES batch(batch_id),
            drum_code TEXT NOT NULL REFERENCES drum(code),
            storage_code TEXT NOT NULL REFERENCES storage_location(code),
            position INTEGER NOT NULL CHECK (position > 0),
            length_cm INTEGER NOT NULL CHECK (length_cm > 0),
            created_at TEXT NOT NULL,
            UNIQUE (batch_id, position)
        );
        CREATE INDEX IF NOT EXISTS idx_batch_item_batch ON batch_item(batch_id);
        CREATE INDEX IF NOT EXISTS idx_batch_item_drum ON batch_item(drum_code);
        CREATE INDEX IF NOT EXISTS idx_batch_item_storage ON batch_item(storage_code);

        CREATE TABLE IF NOT EXISTS import_log (
            log_id TEXT PRIMARY KEY,
            batch_number TEXT NOT NULL,
            file_name TEXT NOT NULL DEFAULT '',
            file_sha256 TEXT NOT NULL,
            total INTEGER NOT NULL DEFAULT 0,
            inserted INTEGER NOT NULL DEFAULT 0,
            duplicates_in_file INTEGER NOT NULL DEFAULT 0,
            duplicates_in_store INTEGER NOT NULL DEFAULT 0,
            invalid_rows INTEGER NOT NULL DEFAULT 0,
            elapsed_ms INTEGER NOT NULL DEFAULT 0 CHECK (elapsed_ms >= 0),
            errors_json TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_import_log_batch ON import_log(batch_number);
        CREATE INDEX IF NOT EXISTS idx_import_log_sha ON import_log(file_sha256);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )?;
    Ok(())
}
