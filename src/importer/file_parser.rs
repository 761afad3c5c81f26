// ==========================================
// 出货数据对账系统 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx/.xls/.xlsm) / ODS (.ods)
// 红线: 读取阶段不做类型转换，所有单元格均为文本
// ==========================================

use crate::domain::table::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// 支持的表格扩展名
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "ods"];

/// Excel 日期单元格的文本格式
pub const EXCEL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 单元格 → 文本（日期单元格按 EXCEL_DATETIME_FORMAT 输出，不输出序列号）
fn cell_text(cell: &Data) -> String {
    let text = match cell {
        Data::DateTime(dt) if !dt.is_duration() => dt
            .as_datetime()
            .map(|d| d.format(EXCEL_DATETIME_FORMAT).to_string())
            .unwrap_or_else(|| cell.to_string()),
        _ => cell.to_string(),
    };
    text.trim().to_string()
}

/// 读取文件扩展名（小写）
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 表头清洗：去 BOM + TRIM，空表头按列位置命名
fn clean_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .enumerate()
        .map(|(idx, h)| {
            let h = h.as_ref().trim_start_matches('\u{feff}').trim();
            if h.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                h.to_string()
            }
        })
        .collect()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头（非 UTF-8 字节按替换字符处理）
        let header_record = reader.byte_headers()?.clone();
        if header_record.is_empty() {
            return Err(ImportError::MissingHeaderRow(path.display().to_string()));
        }
        let headers = clean_headers(header_record.iter().map(|h| String::from_utf8_lossy(h)));
        let mut table = RawTable::new(headers);

        // 读取所有行
        for result in reader.byte_records() {
            let record = result?;
            let values: Vec<String> = record
                .iter()
                .map(|v| String::from_utf8_lossy(v).trim().to_string())
                .collect();

            // 跳过完全空白的行
            if values.iter().all(|v| v.is_empty()) {
                continue;
            }

            table.push_values(values);
        }

        debug!(
            file = %path.display(),
            columns = table.headers().len(),
            rows = table.len(),
            "CSV 解析完成"
        );
        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查扩展名
        let ext = extension_of(path);
        if !SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开工作簿（按扩展名自动识别格式）
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::EmptyWorkbook(path.display().to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::MissingHeaderRow(path.display().to_string()))?;
        let headers = clean_headers(header_row.iter().map(cell_text));
        let mut table = RawTable::new(headers);

        // 读取数据行
        for data_row in rows {
            let values: Vec<String> = data_row.iter().map(cell_text).collect();

            // 跳过完全空白的行
            if values.iter().all(|v| v.is_empty()) {
                continue;
            }

            table.push_values(values);
        }

        debug!(
            file = %path.display(),
            sheet = %sheet_name,
            columns = table.headers().len(),
            rows = table.len(),
            "Excel 解析完成"
        );
        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 扩展名是否受支持（在任何行处理之前判断）
    pub fn is_supported<P: AsRef<Path>>(file_path: P) -> bool {
        let ext = extension_of(file_path.as_ref());
        ext == "csv" || SPREADSHEET_EXTENSIONS.contains(&ext.as_str())
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        self.parse_to_raw_table(file_path.as_ref())
    }
}

impl FileParser for UniversalFileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let ext = extension_of(file_path);
        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(file_path),
            e if SPREADSHEET_EXTENSIONS.contains(&e) => ExcelParser.parse_to_raw_table(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
