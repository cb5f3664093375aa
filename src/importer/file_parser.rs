// ==========================================
// 电缆仓储系统 - 文件解析器实现
// ==========================================
// 支持: CSV（UTF-8, 容忍 BOM; 表头必需）
// 必需列: position / drum_code / length（大小写与首尾空白不敏感）
// 多余列忽略; 行长度允许不一致
// ==========================================

use crate::domain::inventory::RawBatchRow;
use crate::importer::batch_importer_trait::FileParser;
use crate::importer::error::ImportError;
use csv::ReaderBuilder;

/// 必需列名（规范化后）
const REQUIRED_COLUMNS: [&str; 3] = ["position", "drum_code", "length"];

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 规范化表头: TRIM + 小写
    fn normalize_header(raw: &str) -> String {
        raw.trim().to_lowercase()
    }
}

impl FileParser for CsvParser {
    fn parse(&self, file_bytes: &[u8]) -> Result<Vec<RawBatchRow>, ImportError> {
        // 解码 UTF-8, 剥离可能的 BOM
        let text = std::str::from_utf8(file_bytes)
            .map_err(|e| ImportError::InvalidEncoding(e.to_string()))?;
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        // 读取表头并定位必需列
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(Self::normalize_header)
            .collect();

        let mut column_index = [0usize; 3];
        let mut missing: Vec<&str> = Vec::new();
        for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
            match headers.iter().position(|h| h == name) {
                Some(idx) => column_index[slot] = idx,
                None => missing.push(name),
            }
        }
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(ImportError::MissingColumns(missing.join(", ")));
        }

        // 读取数据行; 表头占第 1 行, 数据从第 2 行起
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let field = |slot: usize| -> String {
                record
                    .get(column_index[slot])
                    .unwrap_or("")
                    .to_string()
            };

            rows.push(RawBatchRow {
                line_no: idx + 2,
                position: field(0),
                drum_code: field(1),
                length: field(2),
            });
        }

        Ok(rows)
    }
}
