// ==========================================
// 表格清单 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 所有错误均终止整个加载，不返回部分清单
// ==========================================

use std::fmt;
use thiserror::Error;

/// 实体类别（用于错误信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Host,
    Group,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Host => write!(f, "host"),
            EntityKind::Group => write!(f, "group"),
        }
    }
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx/.xlsm/.xls/.ods）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 字段转换错误 =====
    #[error("类型转换失败 (字段 {field}, 值 {value:?}): {message}")]
    TypeConversionError {
        field: String,
        value: String,
        message: String,
    },

    // ===== 清单构建错误 =====
    #[error("{kind} name must not be empty (第 {row} 行)")]
    MissingName { kind: EntityKind, row: usize },

    #[error("{owner} 引用的组不存在: {group}")]
    UnresolvedGroup { owner: String, group: String },

    #[error("组引用存在环: {chain}")]
    CyclicGroupReference { chain: String },

    // ===== 配置错误 =====
    #[error("配置读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ImportError {
    fn from(err: serde_yaml::Error) -> Self {
        ImportError::ConfigValueError {
            key: "inventory".to_string(),
            value: String::new(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_message() {
        let err = ImportError::MissingName {
            kind: EntityKind::Group,
            row: 3,
        };
        assert!(err.to_string().starts_with("group name must not be empty"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ImportError = io.into();
        assert!(matches!(err, ImportError::FileReadError(_)));
    }
}
