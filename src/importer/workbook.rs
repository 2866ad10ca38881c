// ==========================================
// 製造命令前處理 - 来源活頁簿
// ==========================================
// 职责: 以 A1 为原点保存每张工作表的全部单元格
// 用途: 1) 选择工作表读取资料  2) 写出时原样保留所有工作表
// ==========================================

use crate::domain::CellValue;
use crate::importer::error::{ImportError, ImportResult};

// ==========================================
// SheetGrid - 单张工作表（行 × 列）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// 由按行排列的记录构建（第 0 行即 Excel 第 1 列）
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 写入单元格（必要时自动扩展）
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, CellValue::default);
        }
        cells[col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 从 start_row 起各行的最大宽度
    pub fn width_from(&self, start_row: usize) -> usize {
        self.rows
            .iter()
            .skip(start_row)
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// 遍历所有非空单元格 (行, 列, 值)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_empty())
                .map(move |(c, v)| (r, c, v))
        })
    }
}

// ==========================================
// SourceWorkbook - 来源活頁簿
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceWorkbook {
    /// 上传/输入的文件名（不含目录）
    pub file_name: String,
    pub sheets: Vec<SheetGrid>,
}

impl SourceWorkbook {
    pub fn new(file_name: impl Into<String>, sheets: Vec<SheetGrid>) -> Self {
        Self {
            file_name: file_name.into(),
            sheets,
        }
    }

    /// 工作表名称列表（保持原顺序）
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn sheet(&self, name: &str) -> ImportResult<&SheetGrid> {
        self.sheets
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| ImportError::SheetNotFound(name.to_string()))
    }

    pub fn first_sheet(&self) -> ImportResult<&SheetGrid> {
        self.sheets.first().ok_or(ImportError::NoSheets)
    }
}
