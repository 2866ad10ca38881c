// ==========================================
// 製造命令前處理 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xls/.xlsb/.ods) / CSV (.csv)
// ==========================================

use crate::domain::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::WorkbookLoader;
use crate::importer::workbook::{SheetGrid, SourceWorkbook};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];
const CSV_EXTENSIONS: &[&str] = &["csv"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ImportError::FileNotFound(path.display().to_string()))
    }
}

/// calamine 单元格 → CellValue
pub fn cell_from_calamine(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::text(if *b { "True" } else { "False" }),
        // 错误值（#N/A 等）按空值处理
        Data::Error(_) => CellValue::Empty,
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::text(cell.to_string())),
        other => CellValue::text(other.to_string()),
    }
}

// ==========================================
// CSV Loader 实现
// ==========================================
// CSV 视为单一工作表，名称取文件名（不含扩展名）
pub struct CsvLoader;

impl WorkbookLoader for CsvLoader {
    fn load(&self, file_path: &Path) -> ImportResult<SourceWorkbook> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if !CSV_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 CSV 文件（标题列位置由 header_row 决定，这里不解析表头）
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let sheet_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Sheet1".to_string());

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let cells = record
                .iter()
                .enumerate()
                .map(|(col_idx, value)| {
                    // 去除 UTF-8 BOM
                    if row_idx == 0 && col_idx == 0 {
                        CellValue::text(value.trim_start_matches('\u{feff}'))
                    } else {
                        CellValue::text(value)
                    }
                })
                .collect();
            rows.push(cells);
        }

        debug!(sheet = %sheet_name, rows = rows.len(), "CSV 读取完成");
        Ok(SourceWorkbook::new(
            file_name_of(path),
            vec![SheetGrid::from_rows(sheet_name, rows)],
        ))
    }
}

// ==========================================
// Excel Loader 实现
// ==========================================
pub struct ExcelLoader;

impl WorkbookLoader for ExcelLoader {
    fn load(&self, file_path: &Path) -> ImportResult<SourceWorkbook> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names().to_owned();
        if sheet_names.is_empty() {
            return Err(ImportError::NoSheets);
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;

            // range 从第一个有值的单元格开始，换算回以 A1 为原点
            let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
            let row_offset = row_offset as usize;
            let col_offset = col_offset as usize;

            let mut grid = SheetGrid::new(sheet_name.clone());
            for (row, col, cell) in range.cells() {
                let value = cell_from_calamine(cell);
                if value.is_empty() {
                    continue;
                }
                grid.set(row_offset + row, col_offset + col, value);
            }

            debug!(sheet = %sheet_name, rows = grid.row_count(), "工作表读取完成");
            sheets.push(grid);
        }

        info!(file = %path.display(), sheets = sheets.len(), "活頁簿读取完成");
        Ok(SourceWorkbook::new(file_name_of(path), sheets))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalLoader;

impl WorkbookLoader for UniversalLoader {
    fn load(&self, file_path: &Path) -> ImportResult<SourceWorkbook> {
        let ext = extension_of(file_path);

        if CSV_EXTENSIONS.contains(&ext.as_str()) {
            CsvLoader.load(file_path)
        } else if EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            ExcelLoader.load(file_path)
        } else {
            Err(ImportError::UnsupportedFormat(ext))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_loader_valid_file() {
        let temp_file = csv_file(&["標題", ",", "產品品號,品名", "a,Enzyme", "B1,Kit"]);

        let workbook = CsvLoader.load(temp_file.path()).unwrap();
        assert_eq!(workbook.sheets.len(), 1);

        let sheet = &workbook.sheets[0];
        assert_eq!(sheet.get(2, 0), Some(&CellValue::text("產品品號")));
        assert_eq!(sheet.get(3, 1), Some(&CellValue::text("Enzyme")));
        assert_eq!(sheet.row_count(), 5);
    }

    #[test]
    fn test_csv_loader_strips_bom() {
        let temp_file = csv_file(&["\u{feff}產品品號,品名"]);
        let workbook = CsvLoader.load(temp_file.path()).unwrap();
        assert_eq!(
            workbook.sheets[0].get(0, 0),
            Some(&CellValue::text("產品品號"))
        );
    }

    #[test]
    fn test_csv_loader_file_not_found() {
        let result = CsvLoader.load(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_loader_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalLoader.load(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_cell_from_calamine() {
        assert_eq!(cell_from_calamine(&Data::Int(80)), CellValue::Number(80.0));
        assert_eq!(
            cell_from_calamine(&Data::String("  ".to_string())),
            CellValue::Empty
        );
        assert_eq!(cell_from_calamine(&Data::Empty), CellValue::Empty);
    }
}
