// ==========================================
// 电缆仓储系统 - 行结构校验器实现
// ==========================================
// 第一阶段校验: 逐行、纯函数、不访问数据库
// 校验顺序 drum_code → length → position, 首个失败字段即止
// 错误文本引用文件内 1 基行号（数据从第 2 行起）
// ==========================================

use crate::domain::catalog::normalize_code;
use crate::domain::inventory::{CandidateRow, RawBatchRow};
use crate::domain::types::Length;
use crate::importer::batch_importer_trait::RowValidator as RowValidatorTrait;

// ==========================================
// RowValidator 实现
// ==========================================
pub struct RowValidator;

impl RowValidatorTrait for RowValidator {
    fn validate(&self, row: &RawBatchRow, max_length: Length) -> Result<CandidateRow, String> {
        // drum_code: TRIM + UPPER, 空即无效
        let drum_code = normalize_code(&row.drum_code);
        if drum_code.is_empty() {
            return Err(format!("第 {} 行: 盘具编码为空。", row.line_no));
        }

        // length: 空 / 不可解析 / 非正 / 超上限 均无效
        let raw_length = row.length.trim();
        if raw_length.is_empty() {
            return Err(format!("第 {} 行: 长度未填写。", row.line_no));
        }
        let length = match Length::parse(raw_length) {
            Some(l) => l,
            None => {
                return Err(format!(
                    "第 {} 行: 长度 '{}' 无法解析。",
                    row.line_no, row.length
                ))
            }
        };
        if !length.is_positive() {
            return Err(format!(
                "第 {} 行: 长度必须大于 0（实际 {}）。",
                row.line_no, length
            ));
        }
        if length > max_length {
            return Err(format!(
                "第 {} 行: 长度超出上限（{}）。",
                row.line_no, length
            ));
        }

        // position: 必填, 空位置无法默认或推断, 必须为正整数
        let raw_position = row.position.trim();
        if raw_position.is_empty() {
            return Err(format!(
                "第 {} 行: position 为空 — 该行已跳过。",
                row.line_no
            ));
        }
        let position = match raw_position.parse::<i64>() {
            Ok(p) if p > 0 => p,
            _ => {
                return Err(format!(
                    "第 {} 行: position '{}' 不是正整数。",
                    row.line_no, raw_position
                ))
            }
        };

        Ok(CandidateRow {
            line_no: row.line_no,
            drum_code,
            position,
            length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line_no: usize, position: &str, drum_code: &str, length: &str) -> RawBatchRow {
        RawBatchRow {
            line_no,
            position: position.to_string(),
            drum_code: drum_code.to_string(),
            length: length.to_string(),
        }
    }

    fn validate(row: &RawBatchRow) -> Result<CandidateRow, String> {
        RowValidator.validate(row, Length::MAX_IMPORT)
    }

    #[test]
    fn test_valid_row_normalized() {
        let candidate = validate(&raw(2, " 3 ", " drum-001 ", "150,5")).unwrap();
        assert_eq!(candidate.position, 3);
        assert_eq!(candidate.drum_code, "DRUM-001");
        assert_eq!(candidate.length, Length::from_centimeters(15050));
    }

    #[test]
    fn test_empty_drum_code() {
        let err = validate(&raw(2, "1", "   ", "100")).unwrap_err();
        assert_eq!(err, "第 2 行: 盘具编码为空。");
    }

    #[test]
    fn test_length_defects() {
        assert!(validate(&raw(3, "1", "D1", ""))
            .unwrap_err()
            .contains("长度未填写"));
        assert!(validate(&raw(4, "1", "D1", "text"))
            .unwrap_err()
            .contains("无法解析"));
        assert!(validate(&raw(5, "1", "D1", "-5"))
            .unwrap_err()
            .contains("无法解析"));
        assert!(validate(&raw(6, "1", "D1", "0"))
            .unwrap_err()
            .contains("必须大于 0"));
        assert!(validate(&raw(7, "1", "D1", "5000000"))
            .unwrap_err()
            .contains("超出上限"));
    }

    #[test]
    fn test_position_defects() {
        assert!(validate(&raw(2, "", "D1", "100"))
            .unwrap_err()
            .contains("position 为空"));
        assert!(validate(&raw(3, "  ", "D1", "100"))
            .unwrap_err()
            .contains("position 为空"));
        assert!(validate(&raw(4, "0", "D1", "100"))
            .unwrap_err()
            .contains("不是正整数"));
        assert!(validate(&raw(5, "-2", "D1", "100"))
            .unwrap_err()
            .contains("不是正整数"));
        assert!(validate(&raw(6, "1.5", "D1", "100"))
            .unwrap_err()
            .contains("不是正整数"));
    }

    #[test]
    fn test_first_failing_field_wins() {
        // drum_code 与 position 同时缺陷: 只报 drum_code
        let err = validate(&raw(2, "", "", "")).unwrap_err();
        assert!(err.contains("盘具编码为空"));
    }

    #[test]
    fn test_max_length_boundary() {
        // 恰好等于上限可通过
        assert!(validate(&raw(2, "1", "D1", "1000000")).is_ok());
        assert!(validate(&raw(3, "1", "D1", "1000000.01")).is_err());
    }
}
