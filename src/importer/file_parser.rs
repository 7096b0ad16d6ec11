// ==========================================
// 表格清单 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx/.xlsm/.xls/.ods)
// 说明: 只做读取，不做分隔符探测与单元格类型推断
// ==========================================

use crate::domain::scalar::{RawRow, Scalar};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

const EXCEL_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ImportError::FileNotFound(path.display().to_string()))
    }
}

// 全部单元格为空的行不输出
fn is_blank_row(row: &RawRow) -> bool {
    row.values().all(Scalar::is_empty)
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 单元格一律为文本，不去除空白
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头（去除 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            // 短行缺失的列补 Null
            let row: RawRow = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = record.get(idx).map_or(Scalar::Null, Scalar::text);
                    (header.clone(), value)
                })
                .collect();

            if is_blank_row(&row) {
                continue;
            }
            rows.push(row);
        }

        debug!(file = %file_path.display(), rows = rows.len(), "CSV 解析完成");
        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取第一个工作表，首行为表头
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格 → Scalar（空单元格、错误单元格 → Null）
    pub fn cell_to_scalar(cell: &Data) -> Scalar {
        match cell {
            Data::Empty | Data::Error(_) => Scalar::Null,
            Data::Int(i) => Scalar::Integer(*i),
            Data::Float(f) => Scalar::Float(*f),
            Data::Bool(b) => Scalar::Bool(*b),
            Data::String(s) => Scalar::Text(s.clone()),
            other => Scalar::Text(other.to_string()),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet_rows = range.rows();
        let headers: Vec<String> = match sheet_rows.next() {
            Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
            None => return Ok(Vec::new()),
        };

        let mut rows = Vec::new();
        for data_row in sheet_rows {
            let row: RawRow = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = data_row.get(idx).map_or(Scalar::Null, Self::cell_to_scalar);
                    (header.clone(), value)
                })
                .collect();

            if is_blank_row(&row) {
                continue;
            }
            rows.push(row);
        }

        debug!(file = %file_path.display(), sheet = %sheet_name, rows = rows.len(), "Excel 解析完成");
        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let ext = extension_of(file_path);
        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_rows(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_to_raw_rows(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
