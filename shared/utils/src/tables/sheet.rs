//! Generic tabular reader over CSV and Excel inputs.

use std::path::Path;

use crate::error::{AuditError, AuditResult};

/// Extensions accepted when discovering the prefixed input spreadsheets.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

/// Supported table file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Excel, // XLSX/XLS
}

impl TableFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// One read table: header row plus stringified data rows. Headers are
/// lowercased and trimmed so loaders can match column names loosely.
#[derive(Debug, Clone)]
pub struct Sheet {
    /// File name the table came from, carried into schema errors.
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Index of a named column, matched case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.headers.iter().position(|h| *h == wanted)
    }

    /// Cell value at (row, column), empty when the row is short.
    pub fn cell<'a>(&'a self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Read a table from disk, format detected from the extension.
pub fn read_sheet(path: &Path) -> AuditResult<Sheet> {
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let format = TableFormat::from_extension(path)
        .ok_or_else(|| AuditError::schema(&source, "unrecognized spreadsheet extension"))?;
    let data = std::fs::read(path)?;
    read_sheet_bytes(&source, &data, format)
}

/// Read a table from in-memory bytes.
pub fn read_sheet_bytes(source: &str, data: &[u8], format: TableFormat) -> AuditResult<Sheet> {
    match format {
        TableFormat::Csv => parse_csv(source, data),
        TableFormat::Excel => parse_excel(source, data),
    }
}

fn parse_csv(source: &str, data: &[u8]) -> AuditResult<Sheet> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AuditError::schema(source, format!("failed to read headers: {e}")))?
        .iter()
        .map(|h| h.to_lowercase().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| AuditError::schema(source, format!("row {}: {e}", idx + 2)))?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(Sheet {
        source: source.to_string(),
        headers,
        rows,
    })
}

fn parse_excel(source: &str, data: &[u8]) -> AuditResult<Sheet> {
    use calamine::{open_workbook_from_rs, DataType, Reader, Xlsx};

    let cursor = std::io::Cursor::new(data);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
        .map_err(|e| AuditError::schema(source, format!("failed to open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AuditError::schema(source, "no sheets found in workbook"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| AuditError::schema(source, "failed to locate worksheet"))?
        .map_err(|e| AuditError::schema(source, format!("failed to read worksheet: {e}")))?;

    let mut rows_iter = range.rows();

    // First row is headers
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| AuditError::schema(source, "empty worksheet"))?
        .iter()
        .map(|cell: &DataType| cell.to_string().to_lowercase().trim().to_string())
        .collect();

    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    Ok(Sheet {
        source: source.to_string(),
        headers,
        rows,
    })
}
