// ==========================================
// 製造命令前處理 - 活頁簿写出
// ==========================================
// 职责: 保留所有来源工作表的储存格内容 + 新增处理结果工作表
// 格式: 结果工作表套用表格样式 (TableStyleMedium9)，产率欄位百分比格式
// ==========================================

use crate::domain::{CellValue, RowSet};
use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::naming::{sanitize_sheet_name, table_name_for};
use crate::importer::{SheetGrid, SourceWorkbook};
use rust_xlsxwriter::{Format, Table, TableColumn, TableStyle, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// 待写出的处理结果工作表
#[derive(Debug, Clone, Copy)]
pub struct ResultSheet<'a> {
    pub name: &'a str,
    pub table: &'a RowSet,
    /// 以百分比格式显示的欄位（产率）
    pub percent_column: &'a str,
}

// ==========================================
// WorkbookWriter - 活頁簿写出器
// ==========================================
pub struct WorkbookWriter {
    percent_format: Format,
    datetime_format: Format,
}

impl WorkbookWriter {
    /// # 参数
    /// - percent_number_format: 产率显示格式（如 "0.00%"）
    pub fn new(percent_number_format: &str) -> Self {
        Self {
            percent_format: Format::new().set_num_format(percent_number_format),
            datetime_format: Format::new().set_num_format(DATETIME_FORMAT),
        }
    }

    /// 写出到文件
    pub fn write_to_path(
        &self,
        source: &SourceWorkbook,
        result: &ResultSheet<'_>,
        path: &Path,
    ) -> ExportResult<()> {
        let mut workbook = self.build(source, result)?;
        workbook.save(path)?;
        info!(path = %path.display(), sheet = result.name, "活頁簿已写出");
        Ok(())
    }

    /// 写出到内存（供下载）
    pub fn write_to_buffer(
        &self,
        source: &SourceWorkbook,
        result: &ResultSheet<'_>,
    ) -> ExportResult<Vec<u8>> {
        let mut workbook = self.build(source, result)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build(&self, source: &SourceWorkbook, result: &ResultSheet<'_>) -> ExportResult<Workbook> {
        let mut workbook = Workbook::new();

        // ===== 1. 原样保留来源工作表 =====
        for grid in &source.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sanitize_sheet_name(grid.name()))?;
            self.write_grid(worksheet, grid)?;
        }

        // ===== 2. 新增处理结果工作表 =====
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(result.name)?;
        self.write_result(worksheet, result)?;

        Ok(workbook)
    }

    fn write_grid(&self, worksheet: &mut Worksheet, grid: &SheetGrid) -> ExportResult<()> {
        for (row, col, value) in grid.cells() {
            let (r, c) = excel_position(grid.name(), row, col)?;
            self.write_cell(worksheet, r, c, value, None)?;
        }
        debug!(sheet = grid.name(), rows = grid.row_count(), "来源工作表已复制");
        Ok(())
    }

    fn write_result(&self, worksheet: &mut Worksheet, result: &ResultSheet<'_>) -> ExportResult<()> {
        let table = result.table;
        let columns = table.columns();
        let percent_col = table.column_position(result.percent_column);

        // 资料列（第 0 列是标题，由表格写入）
        for (row_idx, row) in table.rows().iter().enumerate() {
            for (col_idx, column) in columns.iter().enumerate() {
                let value = row.value_or_empty(column);
                let (r, c) = excel_position(result.name, row_idx + 1, col_idx)?;
                let format = (percent_col == Some(col_idx)).then_some(&self.percent_format);
                self.write_cell(worksheet, r, c, &value, format)?;
            }
        }

        // 表格范围至少含一列资料列
        let (last_row, last_col) = excel_position(
            result.name,
            table.len().max(1),
            columns.len().saturating_sub(1),
        )?;
        let headers: Vec<TableColumn> = columns
            .iter()
            .map(|c| TableColumn::new().set_header(c.as_str()))
            .collect();
        let excel_table = Table::new()
            .set_name(table_name_for(result.name))
            .set_style(TableStyle::Medium9)
            .set_banded_rows(true)
            .set_first_column(false)
            .set_last_column(false)
            .set_columns(&headers);
        worksheet.add_table(0, 0, last_row, last_col, &excel_table)?;

        Ok(())
    }

    fn write_cell(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
        number_format: Option<&Format>,
    ) -> ExportResult<()> {
        match value {
            CellValue::Text(s) => {
                worksheet.write_string(row, col, s.as_str())?;
            }
            CellValue::Number(n) => match number_format {
                Some(format) => {
                    worksheet.write_number_with_format(row, col, *n, format)?;
                }
                None => {
                    worksheet.write_number(row, col, *n)?;
                }
            },
            CellValue::Date(dt) => {
                worksheet.write_datetime_with_format(row, col, dt, &self.datetime_format)?;
            }
            CellValue::Empty => {}
        }
        Ok(())
    }
}

fn excel_position(sheet: &str, row: usize, col: usize) -> ExportResult<(u32, u16)> {
    match (u32::try_from(row), u16::try_from(col)) {
        (Ok(r), Ok(c)) => Ok((r, c)),
        _ => Err(ExportError::SheetTooLarge {
            sheet: sheet.to_string(),
            row,
            col,
        }),
    }
}
