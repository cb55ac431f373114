// ==========================================
// Breather Advisor - File Parser
// ==========================================
// Supports: Excel (.xlsx/.xls) / CSV (.csv)
// Output is a positional RawTable rather than per-row maps: survey
// loaders address some columns by index (vendor reports repeat header
// text) and catalog loaders resolve headers once against an alias
// schema.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// Raw Table
// ==========================================
/// Header row plus data rows, all cells as trimmed strings.
/// Fully blank rows are dropped at parse time.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Resolve a column by candidate header names. Matching is
    /// case-insensitive and whitespace-normalized, so headers broken
    /// across lines in the source sheet ("Water contact conditions\n
    /// High") still resolve.
    pub fn column_index(&self, candidates: &[&str]) -> Option<usize> {
        let normalized: Vec<String> = candidates.iter().map(|c| normalize_header(c)).collect();
        self.headers
            .iter()
            .position(|h| normalized.contains(&normalize_header(h)))
    }

    /// Cell value at (row, column); `None` when absent or blank.
    pub fn cell(&self, row: usize, col: Option<usize>) -> Option<&str> {
        let col = col?;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Lowercase, collapse all whitespace runs (incl. newlines) to one
/// space, trim.
fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ==========================================
// File Parser Contract
// ==========================================
pub trait FileParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged row lengths
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
            // Skip fully blank rows
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // Auto-detected reader so legacy .xls workbooks open alongside
        // .xlsx ones.
        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "workbook has no sheets".to_string(),
            ));
        }

        // First sheet only
        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::EmptyFile(file_path.display().to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in sheet_rows {
            let row: Vec<String> = data_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Universal Parser (dispatch by extension)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(path),
            "xlsx" | "xls" => ExcelParser.parse(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Brand,Model,Max Air Flow (cfm)").unwrap();
        writeln!(temp_file, "Acme,BX-1,5.5").unwrap();
        writeln!(temp_file, "Acme,BX-2,12").unwrap();

        let table = CsvParser.parse(temp_file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers[1], "Model");
        assert_eq!(table.cell(0, Some(0)), Some("Acme"));
        assert_eq!(table.cell(1, Some(2)), Some("12"));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_blank_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Brand,Model").unwrap();
        writeln!(temp_file, "Acme,BX-1").unwrap();
        writeln!(temp_file, ",").unwrap();
        writeln!(temp_file, "Acme,BX-2").unwrap();

        let table = CsvParser.parse(temp_file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_column_index_tolerates_line_breaks() {
        let table = RawTable {
            headers: vec![
                "Brand".to_string(),
                "Water contact conditions\r\nHigh".to_string(),
            ],
            rows: vec![],
        };
        assert_eq!(
            table.column_index(&["Water contact conditions High"]),
            Some(1)
        );
        assert_eq!(table.column_index(&["brand"]), Some(0));
        assert_eq!(table.column_index(&["Missing"]), None);
    }

    #[test]
    fn test_xls_extension_reaches_the_excel_reader() {
        // Legacy .xls routes to the auto-detected workbook reader;
        // unreadable content surfaces as a parse error, not an
        // unsupported format.
        let mut temp_file = tempfile::Builder::new()
            .suffix(".xls")
            .tempfile()
            .unwrap();
        temp_file.write_all(b"not a workbook").unwrap();

        let result = UniversalFileParser.parse(temp_file.path());
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse(Path::new("data.txt"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_cell_blank_is_none() {
        let table = RawTable {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["x".to_string(), String::new()]],
        };
        assert_eq!(table.cell(0, Some(0)), Some("x"));
        assert_eq!(table.cell(0, Some(1)), None);
        // Ragged row: out-of-range column is None
        assert_eq!(table.cell(0, Some(5)), None);
    }
}
