// ==========================================
// 电缆仓储系统 - 领域类型定义
// ==========================================
// 长度统一使用固定两位小数（米），内部以厘米整数存储，
// 避免浮点比较误差（容量校验要求 100.01 > 100.00 严格成立）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 长度 (Length)
// ==========================================
// 表示"米"为单位、精确到小数点后两位的长度。
// 内部存储为厘米计数（i64），比较与相等均为精确整数语义。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Length(i64);

impl Length {
    /// 零长度
    pub const ZERO: Length = Length(0);

    /// 导入长度硬上限: 1,000,000.00 米
    pub const MAX_IMPORT: Length = Length(100_000_000);

    /// 从厘米计数构造
    pub fn from_centimeters(cm: i64) -> Self {
        Length(cm)
    }

    /// 从整数米构造
    pub fn from_meters(m: i64) -> Self {
        Length(m * 100)
    }

    /// 厘米计数
    pub fn centimeters(&self) -> i64 {
        self.0
    }

    /// 是否为正长度
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// 解析长度字符串
    ///
    /// 语法: 可选首尾空白，数字序列，可选的单个小数分隔符（'.' 或 ','）
    /// 及其后续数字。超过两位的小数按"四舍六入五成双"归整到两位。
    ///
    /// 不接受符号、指数或其他任何内容；解析失败返回 None。
    pub fn parse(raw: &str) -> Option<Length> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        // 小数逗号与小数点同义
        let s = s.replace(',', ".");

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s.as_str(), ""),
        };

        // 整数部分必须存在；剩余部分不允许出现第二个分隔符
        if int_part.is_empty()
            || frac_part.contains('.')
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let meters: i64 = int_part.parse().ok()?;
        let frac_cm: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().ok()? * 10,
            2 => frac_part.parse::<i64>().ok()?,
            _ => {
                let head: i64 = frac_part[..2].parse().ok()?;
                let rest = frac_part[2..].as_bytes();
                let first = rest[0] - b'0';
                let tail_nonzero = rest[1..].iter().any(|&b| b != b'0');
                if first > 5 || (first == 5 && tail_nonzero) {
                    head + 1
                } else if first == 5 && head % 2 == 1 {
                    // 半数位且前一位为奇数: 进位成双
                    head + 1
                } else {
                    head
                }
            }
        };

        let cm = meters.checked_mul(100)?.checked_add(frac_cm)?;
        Some(Length(cm))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(Length::parse("250"), Some(Length::from_meters(250)));
        assert_eq!(Length::parse("  100  "), Some(Length::from_meters(100)));
    }

    #[test]
    fn test_parse_decimal_point_and_comma_equivalent() {
        assert_eq!(Length::parse("12.5"), Some(Length::from_centimeters(1250)));
        assert_eq!(Length::parse("12,5"), Some(Length::from_centimeters(1250)));
        assert_eq!(Length::parse("150.5"), Some(Length::from_centimeters(15050)));
    }

    #[test]
    fn test_parse_two_decimals() {
        assert_eq!(Length::parse("100.01"), Some(Length::from_centimeters(10001)));
        assert_eq!(Length::parse("0.01"), Some(Length::from_centimeters(1)));
        // 尾随分隔符允许（"12." 即 12.00）
        assert_eq!(Length::parse("12."), Some(Length::from_meters(12)));
    }

    #[test]
    fn test_parse_excess_decimals_rounds_half_even() {
        assert_eq!(Length::parse("1.234"), Some(Length::from_centimeters(123)));
        assert_eq!(Length::parse("1.236"), Some(Length::from_centimeters(124)));
        // 恰为半数位: 取偶
        assert_eq!(Length::parse("1.225"), Some(Length::from_centimeters(122)));
        assert_eq!(Length::parse("1.235"), Some(Length::from_centimeters(124)));
        // 半数位之后还有非零位: 进位
        assert_eq!(Length::parse("1.2251"), Some(Length::from_centimeters(123)));
        // 进位跨过整数位
        assert_eq!(Length::parse("9.999"), Some(Length::from_centimeters(1000)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Length::parse(""), None);
        assert_eq!(Length::parse("   "), None);
        assert_eq!(Length::parse("text"), None);
        assert_eq!(Length::parse("-5"), None);
        assert_eq!(Length::parse("+5"), None);
        assert_eq!(Length::parse("1.2.3"), None);
        assert_eq!(Length::parse("1,2,3"), None);
        assert_eq!(Length::parse(".5"), None);
        assert_eq!(Length::parse("1e3"), None);
        assert_eq!(Length::parse("12 5"), None);
    }

    #[test]
    fn test_parse_zero_is_parsable_but_not_positive() {
        let zero = Length::parse("0").unwrap();
        assert!(!zero.is_positive());
        // 0.004 归整到 0.00
        let tiny = Length::parse("0.004").unwrap();
        assert!(!tiny.is_positive());
    }

    #[test]
    fn test_ordering_is_exact() {
        let capacity = Length::parse("100.00").unwrap();
        assert!(Length::parse("100.01").unwrap() > capacity);
        assert!(Length::parse("100.00").unwrap() <= capacity);
        assert!(Length::parse("1000000").unwrap() <= Length::MAX_IMPORT);
        assert!(Length::parse("1000000.01").unwrap() > Length::MAX_IMPORT);
    }

    #[test]
    fn test_display_fixed_two_decimals() {
        assert_eq!(Length::from_centimeters(1250).to_string(), "12.50");
        assert_eq!(Length::from_meters(600).to_string(), "600.00");
        assert_eq!(Length::from_centimeters(5).to_string(), "0.05");
    }
}
