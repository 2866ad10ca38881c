// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的行集构造、临时活頁簿生成等功能
// ==========================================

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::path::{Path, PathBuf};
use work_order_prep::{CellValue, Row, RowSet};

/// 五个必要输入欄位
pub const INPUT_COLUMNS: [&str; 5] = ["產品品號", "品名", "製令單號", "已生產量", "預計產量"];

/// 构造一笔製令资料
pub fn order_row(id: &str, name: &str, order: &str, produced: f64, planned: f64) -> Row {
    Row::from_pairs([
        ("產品品號", CellValue::text(id)),
        ("品名", CellValue::text(name)),
        ("製令單號", CellValue::text(order)),
        ("已生產量", CellValue::Number(produced)),
        ("預計產量", CellValue::Number(planned)),
    ])
}

/// 以必要欄位 + 额外欄位构造行集
pub fn order_table(extra_columns: &[&str], rows: Vec<Row>) -> RowSet {
    let columns = INPUT_COLUMNS
        .iter()
        .chain(extra_columns.iter())
        .map(|c| c.to_string())
        .collect();
    RowSet::with_rows(columns, rows)
}

/// 一个测试工作表: 名称 + 标题 + 资料
pub struct SheetSpec<'a> {
    pub name: &'a str,
    pub headers: &'a [&'a str],
    pub rows: Vec<Vec<CellValue>>,
}

/// 生成临时 .xlsx 活頁簿（标题位于第 3 列，前两列为表头说明）
pub fn write_order_workbook(
    dir: &Path,
    file_name: &str,
    sheets: &[SheetSpec<'_>],
) -> Result<PathBuf, Box<dyn Error>> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name)?;
        worksheet.write_string(0, 0, "製造命令單頭")?;
        worksheet.write_string(1, 0, "列印日期: 2024/06/30")?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string(2, col as u16, *header)?;
        }
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let r = (row_idx + 3) as u32;
            for (col, value) in row.iter().enumerate() {
                match value {
                    CellValue::Text(s) => {
                        worksheet.write_string(r, col as u16, s.as_str())?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(r, col as u16, *n)?;
                    }
                    CellValue::Date(_) | CellValue::Empty => {}
                }
            }
        }
    }

    let path = dir.join(file_name);
    workbook.save(&path)?;
    Ok(path)
}
