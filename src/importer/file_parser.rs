// ==========================================
// 表格行绑定引擎 - 文件行数据源实现
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx/.xlsm/.xls/.xlsb/.ods)
// 约定: 首行为表头（trim）,空单元格 → RawValue::Empty,整行空白跳过
// ==========================================

use crate::domain::types::{RawRow, RawValue};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_source_trait::{RowSource, RowStream};
use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use tracing::debug;

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn text_cell(value: &str) -> RawValue {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        RawValue::Empty
    } else {
        RawValue::Text(trimmed.to_string())
    }
}

// ==========================================
// CSV 行数据源
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CsvRowSource {
    delimiter: u8,
}

impl Default for CsvRowSource {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 自定义分隔符（如 b';' / b'\t'）
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn record_to_row(headers: &[String], record: &StringRecord) -> RawRow {
        let mut row = RawRow::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                // 空表头列无法被绑定
                if header.is_empty() {
                    continue;
                }
                row.insert(header.as_str(), text_cell(value));
            }
        }
        row
    }
}

impl RowSource for CsvRowSource {
    fn open<'a>(&'a self, path: &Path) -> ImportResult<RowStream<'a>> {
        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .delimiter(self.delimiter)
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader(path.display().to_string()));
        }
        debug!(path = %path.display(), columns = headers.len(), "CSV 表头读取完成");

        let rows = reader.into_records().filter_map(move |result| match result {
            Err(e) => Some(Err(ImportError::from(e))),
            Ok(record) => {
                let row = Self::record_to_row(&headers, &record);
                // 跳过完全空白的行
                if row.is_blank() {
                    None
                } else {
                    Some(Ok(row))
                }
            }
        });

        Ok(Box::new(rows))
    }
}

// ==========================================
// Excel 行数据源
// ==========================================
// 读取第一个工作表,首行为表头
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelRowSource;

impl ExcelRowSource {
    fn cell_to_raw(cell: &Data) -> RawValue {
        match cell {
            Data::Empty | Data::Error(_) => RawValue::Empty,
            Data::String(s) => text_cell(s),
            Data::Int(i) => RawValue::Int(*i),
            Data::Float(f) => RawValue::Float(*f),
            Data::Bool(b) => RawValue::Bool(*b),
            Data::DateTime(dt) => dt
                .as_datetime()
                .map(RawValue::DateTime)
                .unwrap_or(RawValue::Float(dt.as_f64())),
            other => text_cell(&other.to_string()),
        }
    }
}

impl RowSource for ExcelRowSource {
    fn open<'a>(&'a self, path: &Path) -> ImportResult<RowStream<'a>> {
        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开工作簿
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::MissingHeader(path.display().to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader(path.display().to_string()));
        }
        debug!(path = %path.display(), sheet = %sheet_name, columns = headers.len(), "Excel 表头读取完成");

        // calamine 一次性加载整个工作表,此处直接物化
        let mut records = Vec::new();
        for data_row in rows {
            let mut row = RawRow::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if header.is_empty() {
                        continue;
                    }
                    row.insert(header.as_str(), Self::cell_to_raw(cell));
                }
            }

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            records.push(Ok(row));
        }

        Ok(Box::new(records.into_iter()))
    }
}

// ==========================================
// 通用行数据源（根据扩展名自动选择）
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct UniversalRowSource {
    csv: CsvRowSource,
    excel: ExcelRowSource,
}

impl UniversalRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_csv(mut self, csv: CsvRowSource) -> Self {
        self.csv = csv;
        self
    }
}

impl RowSource for UniversalRowSource {
    fn open<'a>(&'a self, path: &Path) -> ImportResult<RowStream<'a>> {
        let ext = extension_of(path);
        match ext.as_str() {
            "csv" => self.csv.open(path),
            e if EXCEL_EXTENSIONS.contains(&e) => self.excel.open(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
