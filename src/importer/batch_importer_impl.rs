// ==========================================
// 电缆仓储系统 - 批次导入器实现
// ==========================================
// 职责: 整合导入流程, 从文件字节到数据库
// 流程: 指纹 → 解析 → 重放检查 → 两阶段校验 → 熔断 → 落库 → 审计
// 红线: 任何终态（成功或任一中止路径）恰好写入一条审计记录
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::audit::ImportLogRecord;
use crate::domain::inventory::{BatchImportOutcome, BatchItem};
use crate::domain::storage::StorageRef;
use crate::importer::batch_importer_trait::{BatchImporter, FileParser, RowValidator};
use crate::importer::error::ImportError;
use crate::repository::{
    BatchRepository, DrumCatalogRepository, ImportLogRepository, StorageLocationRepository,
};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// 计算字节内容的 SHA-256 十六进制指纹（小写）
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// 按上限截断错误列表, 超出部分以一条汇总说明代替
fn cap_errors(errors: &[String], cap: usize) -> Vec<String> {
    if errors.len() <= cap {
        return errors.to_vec();
    }
    let mut capped: Vec<String> = errors[..cap].to_vec();
    capped.push(format!("另有 {} 条错误未写入日志。", errors.len() - cap));
    capped
}

// ==========================================
// 审计计数器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    total: usize,
    inserted: usize,
    duplicates_in_file: usize,
    duplicates_in_store: usize,
    invalid_rows: usize,
}

// ==========================================
// BatchImporterImpl - 批次导入器实现
// ==========================================
pub struct BatchImporterImpl<C, S, B, L, Cfg>
where
    C: DrumCatalogRepository,
    S: StorageLocationRepository,
    B: BatchRepository,
    L: ImportLogRepository,
    Cfg: ImportConfigReader,
{
    // 数据访问层
    catalog_repo: C,
    storage_repo: S,
    batch_repo: B,
    log_repo: L,

    // 配置读取器
    config: Cfg,

    // 管道阶段组件
    file_parser: Box<dyn FileParser>,
    row_validator: Box<dyn RowValidator>,
}

impl<C, S, B, L, Cfg> BatchImporterImpl<C, S, B, L, Cfg>
where
    C: DrumCatalogRepository,
    S: StorageLocationRepository,
    B: BatchRepository,
    L: ImportLogRepository,
    Cfg: ImportConfigReader,
{
    pub fn new(
        catalog_repo: C,
        storage_repo: S,
        batch_repo: B,
        log_repo: L,
        config: Cfg,
        file_parser: Box<dyn FileParser>,
        row_validator: Box<dyn RowValidator>,
    ) -> Self {
        Self {
            catalog_repo,
            storage_repo,
            batch_repo,
            log_repo,
            config,
            file_parser,
            row_validator,
        }
    }

    /// 写入审计记录（每次调用的唯一终点）
    async fn write_log(
        &self,
        batch_number: &str,
        file_name: &str,
        file_sha256: &str,
        counters: Counters,
        errors: Vec<String>,
        started: Instant,
    ) -> Result<(), ImportError> {
        let record = ImportLogRecord::new(
            batch_number,
            file_name,
            file_sha256,
            counters.total,
            counters.inserted,
            counters.duplicates_in_file,
            counters.duplicates_in_store,
            counters.invalid_rows,
            started.elapsed().as_millis() as i64,
            errors,
        );
        self.log_repo.insert(&record).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C, S, B, L, Cfg> BatchImporter for BatchImporterImpl<C, S, B, L, Cfg>
where
    C: DrumCatalogRepository + Send + Sync,
    S: StorageLocationRepository + Send + Sync,
    B: BatchRepository + Send + Sync,
    L: ImportLogRepository + Send + Sync,
    Cfg: ImportConfigReader + Send + Sync,
{
    #[instrument(skip(self, file_bytes, storage), fields(batch_number = %batch_number, file_name = %file_name))]
    async fn import_batch(
        &self,
        file_bytes: &[u8],
        file_name: &str,
        batch_number: &str,
        storage: StorageRef,
    ) -> Result<BatchImportOutcome, ImportError> {
        let started = Instant::now();

        // === 步骤 1: 内容指纹 ===
        let file_sha256 = sha256_hex(file_bytes);
        info!(size = file_bytes.len(), sha256 = %file_sha256, "开始导入批次文件");

        // === 步骤 2: 批次与库位解析（管道开始前统一解析） ===
        let batch = self.batch_repo.get_or_create(batch_number.trim()).await?;
        let storage = match storage {
            StorageRef::Resolved(location) => location,
            StorageRef::Code(code) => {
                self.storage_repo
                    .get_or_create(&crate::domain::normalize_code(&code))
                    .await?
            }
        };
        debug!(batch_id = %batch.batch_id, storage_code = %storage.code, "批次与库位就绪");

        // === 步骤 3: 解析文件 ===
        let rows = match self.file_parser.parse(file_bytes) {
            Ok(rows) => rows,
            Err(err) => {
                // 结构性失败: 零计数审计记录后中止
                error!(error = %err, "文件结构校验失败");
                self.write_log(
                    &batch.number,
                    file_name,
                    &file_sha256,
                    Counters::default(),
                    vec![err.to_string()],
                    started,
                )
                .await?;
                return Err(err);
            }
        };

        let total = rows.len();
        if total == 0 {
            let err = ImportError::EmptyFile;
            warn!("文件不包含数据行");
            self.write_log(
                &batch.number,
                file_name,
                &file_sha256,
                Counters::default(),
                vec![err.to_string()],
                started,
            )
            .await?;
            return Err(err);
        }
        info!(total, "文件解析完成");

        // === 步骤 4: 文件重放检查 ===
        if self
            .log_repo
            .exists_for_batch(&batch.number, &file_sha256)
            .await?
        {
            let err = ImportError::DuplicateFile;
            warn!(sha256 = %file_sha256, "检测到文件重放");
            self.write_log(
                &batch.number,
                file_name,
                &file_sha256,
                Counters {
                    total,
                    duplicates_in_store: total,
                    ..Counters::default()
                },
                vec![err.to_string()],
                started,
            )
            .await?;
            return Err(err);
        }

        // === 步骤 5: 第一阶段 - 逐行结构校验 ===
        debug!("第一阶段: 逐行结构校验");
        let max_length = self.config.get_max_import_length().await?;

        let mut errors: Vec<String> = Vec::new();
        let mut invalid_rows = 0usize;
        let mut candidates = Vec::new();
        for row in &rows {
            match self.row_validator.validate(row, max_length) {
                Ok(candidate) => candidates.push(candidate),
                Err(message) => {
                    invalid_rows += 1;
                    errors.push(message);
                }
            }
        }
        debug!(
            candidates = candidates.len(),
            invalid = invalid_rows,
            "结构校验完成"
        );

        // === 步骤 6: 批量目录查询 ===
        let codes: Vec<String> = {
            let mut seen = HashSet::new();
            candidates
                .iter()
                .filter(|c| seen.insert(c.drum_code.clone()))
                .map(|c| c.drum_code.clone())
                .collect()
        };
        let drums = self.catalog_repo.find_drums_by_codes(&codes).await?;
        debug!(requested = codes.len(), found = drums.len(), "目录查询完成");

        // === 步骤 7: 第二阶段 - 引用校验与查重（按原始行序） ===
        let existing_positions = self.batch_repo.existing_positions(&batch.batch_id).await?;

        let mut duplicates_in_file = 0usize;
        let mut duplicates_in_store = 0usize;
        let mut used_positions: HashSet<i64> = HashSet::new();
        let mut to_insert: Vec<BatchItem> = Vec::new();

        for candidate in candidates {
            let drum = match drums.get(&candidate.drum_code) {
                Some(drum) => drum,
                None => {
                    invalid_rows += 1;
                    errors.push(format!(
                        "第 {} 行: 盘具 '{}' 不在目录中。",
                        candidate.line_no, candidate.drum_code
                    ));
                    continue;
                }
            };

            // 长度不得超过盘具初始长度
            if candidate.length > drum.initial_length {
                invalid_rows += 1;
                errors.push(format!(
                    "第 {} 行: 长度 {} 米超过盘具初始长度 {} 米。",
                    candidate.line_no, candidate.length, drum.initial_length
                ));
                continue;
            }

            // 文件内位置重复: 首次出现者有效, 其后均计重复
            if used_positions.contains(&candidate.position) {
                duplicates_in_file += 1;
                errors.push(format!(
                    "第 {} 行: position {} 在文件内重复。",
                    candidate.line_no, candidate.position
                ));
                continue;
            }

            // 库内位置重复: 既有状态, 静默计数, 不记错误文本
            if existing_positions.contains(&candidate.position) {
                duplicates_in_store += 1;
                continue;
            }

            used_positions.insert(candidate.position);
            to_insert.push(BatchItem::new(
                &batch.batch_id,
                &drum.code,
                &storage.code,
                candidate.position,
                candidate.length,
            ));
        }

        // === 步骤 8: 错误率熔断 ===
        // 质量错误 = 无效行 + 文件内重复; 库内重复反映既有状态, 不计入
        let quality_errors = invalid_rows + duplicates_in_file;
        let ratio = quality_errors as f64 / total as f64;
        let threshold = self.config.get_error_ratio_threshold().await?;
        let cap = self.config.get_error_log_cap().await?;

        if ratio > threshold {
            let err = ImportError::ErrorRatioExceeded {
                quality_errors,
                total,
                threshold,
            };
            warn!(quality_errors, total, ratio, "错误率超过阈值, 导入中止");
            let mut logged = cap_errors(&errors, cap);
            logged.push(err.to_string());
            self.write_log(
                &batch.number,
                file_name,
                &file_sha256,
                Counters {
                    total,
                    inserted: 0,
                    duplicates_in_file,
                    duplicates_in_store,
                    invalid_rows,
                },
                logged,
                started,
            )
            .await?;
            return Err(err);
        }

        // === 步骤 9: 事务化落库 ===
        // 与并发写入方竞争时, 唯一约束冲突静默跳过（inserted 随之减少）
        let inserted = self.batch_repo.insert_items(&to_insert).await?;
        if inserted < to_insert.len() {
            warn!(
                offered = to_insert.len(),
                inserted, "部分行在提交时与既有位置冲突, 已跳过"
            );
        }

        // === 步骤 10: 审计记录 ===
        let counters = Counters {
            total,
            inserted,
            duplicates_in_file,
            duplicates_in_store,
            invalid_rows,
        };
        self.write_log(
            &batch.number,
            file_name,
            &file_sha256,
            counters,
            cap_errors(&errors, cap),
            started,
        )
        .await?;

        info!(
            total,
            inserted,
            invalid_rows,
            duplicates_in_file,
            duplicates_in_store,
            elapsed_ms = started.elapsed().as_millis() as i64,
            "批次文件导入完成"
        );

        Ok(BatchImportOutcome {
            total,
            inserted,
            duplicates_in_file,
            duplicates_in_store,
            invalid_rows,
            errors,
            batch_id: batch.batch_id,
            file_name: file_name.to_string(),
            file_sha256,
        })
    }
}
