// ==========================================
// 表格清单 - 数据清洗器（空值判定 + 类型转换）
// ==========================================
// 职责: 空值判定的唯一口径 / 文本、整数、端口、标志位转换
// 红线: 其他模块不得自行判定空值
// ==========================================

use crate::domain::scalar::Scalar;
use crate::importer::error::{ImportError, ImportResult};

/// 标志位取 false 的文本（小写比较）
const FALSE_FLAG_VALUES: [&str; 3] = ["0", "false", "none"];

pub struct DataCleaner;

impl DataCleaner {
    /// 判定单元格是否为空（缺失视为空）
    pub fn is_empty(&self, value: Option<&Scalar>) -> bool {
        value.map_or(true, Scalar::is_empty)
    }

    /// 标准化空值: 空 → Null，其余原样
    pub fn normalize_null(&self, value: &Scalar) -> Scalar {
        if value.is_empty() {
            Scalar::Null
        } else {
            value.clone()
        }
    }

    /// 转换为文本（空值 → None）
    pub fn to_text(&self, value: Option<&Scalar>) -> Option<String> {
        match value {
            Some(v) if !v.is_empty() => Some(v.to_text()),
            _ => None,
        }
    }

    /// 转换为整数
    ///
    /// - Text: 去除首尾空白后按十进制解析
    /// - Float: 向零截断，须落在 i64 范围内
    /// - Bool: 1 / 0
    pub fn to_int(&self, field: &str, value: &Scalar) -> ImportResult<i64> {
        let converted = match value {
            Scalar::Integer(i) => Some(*i),
            Scalar::Bool(b) => Some(i64::from(*b)),
            Scalar::Float(f) => float_to_int(*f),
            Scalar::Text(s) => s.trim().parse::<i64>().ok(),
            Scalar::Null => None,
        };

        converted.ok_or_else(|| ImportError::TypeConversionError {
            field: field.to_string(),
            value: value.to_text(),
            message: "无法解析为整数".to_string(),
        })
    }

    /// 转换为端口号（空值 → None）
    pub fn to_port(&self, field: &str, value: Option<&Scalar>) -> ImportResult<Option<u16>> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(None),
        };

        let number = self.to_int(field, value)?;
        u16::try_from(number)
            .map(Some)
            .map_err(|_| ImportError::TypeConversionError {
                field: field.to_string(),
                value: value.to_text(),
                message: format!("端口超出范围 [0, {}]", u16::MAX),
            })
    }

    /// 转换为标志位
    ///
    /// 文本形式（小写）为 0 / false / none 时为 false，其余一律为 true
    pub fn to_flag(&self, value: &Scalar) -> bool {
        let text = value.to_text().to_lowercase();
        !FALSE_FLAG_VALUES.contains(&text.as_str())
    }
}

// i64::MAX as f64 为 2^63，取开区间
fn float_to_int(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}
