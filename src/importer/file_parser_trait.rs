// ==========================================
// 表格清单 - 文件解析 Trait
// ==========================================
// 职责: 定义表格文件 → 原始行的接口（不包含实现）
// 实现者: CsvParser, ExcelParser
// ==========================================

use crate::domain::scalar::RawRow;
use crate::importer::error::ImportResult;
use std::path::Path;

pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（列名 → 单元格）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（按文件顺序，跳过全空行）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}
