// ==========================================
// 製造命令前處理 - 资料表读取
// ==========================================
// 职责: 工作表 → 行集（标题列位于固定行号，之前的行忽略）
// 规则:
// - 标题空白 → "Unnamed: {列号}"
// - 标题重复 → 依序加 ".1" / ".2" 后缀
// - 全空白资料行跳过
// ==========================================

use crate::domain::{CellValue, RowSet};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::workbook::SheetGrid;
use std::collections::HashMap;
use tracing::debug;

/// 读取资料表
///
/// # 参数
/// - grid: 工作表
/// - header_row: 标题列行号（1 起算）
///
/// # 返回
/// - Ok(RowSet): 欄位顺序与来源一致
/// - Err(HeaderRowMissing): 工作表行数不足
pub fn read_table(grid: &SheetGrid, header_row: usize) -> ImportResult<RowSet> {
    let header_idx = header_row.saturating_sub(1);
    if header_row == 0 || grid.row_count() <= header_idx {
        return Err(ImportError::HeaderRowMissing {
            sheet: grid.name().to_string(),
            header_row,
        });
    }

    let width = grid.width_from(header_idx);
    let columns = header_names(grid.row(header_idx).unwrap_or(&[]), width);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row_idx in (header_idx + 1)..grid.row_count() {
        let cells = grid.row(row_idx).unwrap_or(&[]);
        if cells.iter().all(CellValue::is_empty) {
            skipped += 1;
            continue;
        }
        let record: Vec<CellValue> = (0..width)
            .map(|c| cells.get(c).cloned().unwrap_or_default())
            .collect();
        records.push(record);
    }

    debug!(
        sheet = grid.name(),
        columns = columns.len(),
        rows = records.len(),
        skipped_blank_rows = skipped,
        "资料表读取完成"
    );
    Ok(RowSet::from_records(columns, records))
}

fn header_names(cells: &[CellValue], width: usize) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    (0..width)
        .map(|c| {
            let raw = cells.get(c).map(|v| v.to_string()).unwrap_or_default();
            let base = match raw.trim() {
                "" => format!("Unnamed: {}", c),
                trimmed => trimmed.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}
