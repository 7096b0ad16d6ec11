// ==========================================
// 表格清单 - 单元格标量类型
// ==========================================
// 职责: 定义原始行的单元格取值（带标签的联合类型）
// 来源: CSV 全部为文本; Excel 保留数值/布尔类型
// ==========================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Scalar - 单元格取值
// ==========================================
// 序列化: untagged，Null 输出为 null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// 原始行记录（列名 → 单元格），保持表头顺序
pub type RawRow = IndexMap<String, Scalar>;

impl Scalar {
    /// 文本单元格
    pub fn text(value: impl Into<String>) -> Self {
        Scalar::Text(value.into())
    }

    /// 是否为"无值": Null / NaN / 空字符串
    ///
    /// 0、false、纯空白字符串均视为有值
    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Float(f) => f.is_nan(),
            Scalar::Text(s) => s.is_empty(),
            Scalar::Bool(_) | Scalar::Integer(_) => false,
        }
    }

    /// 文本形式
    ///
    /// - Float 保留小数点（22.0）
    /// - Bool 输出 True / False
    /// - Null 输出 None
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "None"),
            Scalar::Bool(true) => write!(f, "True"),
            Scalar::Bool(false) => write!(f, "False"),
            Scalar::Integer(i) => write!(f, "{}", i),
            // Debug 格式保留 ".0" 且 NaN 输出 "NaN"
            Scalar::Float(v) => write!(f, "{:?}", v),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}
