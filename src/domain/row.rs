// ==========================================
// 製造命令前處理 - 行与行集
// ==========================================
// 职责: 类型化的行抽象 + 有序列集合
// 说明: 每次处理独占一份 RowSet（按值传入），不与其他调用共享
// ==========================================

use crate::domain::cell::CellValue;
use serde::Serialize;
use std::collections::HashMap;

// ==========================================
// Row - 单行数据（列名 → 单元格值）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 (列名, 值) 对构建
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 读取单元格；列不存在时返回 None
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// 读取单元格；列不存在时视为空值
    pub fn value_or_empty(&self, column: &str) -> CellValue {
        self.get(column).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }
}

// ==========================================
// RowSet - 有序列 + 行集合
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// 由按列位置排列的记录构建（记录长度不足时补空值）
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<CellValue>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                let mut row = Row::new();
                let mut values = record.into_iter();
                for column in &columns {
                    row.set(column.clone(), values.next().unwrap_or_default());
                }
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn column_position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// 登记列名（已存在则保持原位置）
    pub fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    /// 在指定位置插入整列；列已存在时仅覆盖值并保持原位置
    pub fn insert_column(&mut self, position: usize, column: &str, values: Vec<CellValue>) {
        if !self.has_column(column) {
            let position = position.min(self.columns.len());
            self.columns.insert(position, column.to_string());
        }
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.set(column, values.next().unwrap_or_default());
        }
    }

    /// 按行顺序取出某列的值（列不存在时为 None）
    pub fn column_values(&self, column: &str) -> Option<Vec<CellValue>> {
        if !self.has_column(column) {
            return None;
        }
        Some(self.rows.iter().map(|r| r.value_or_empty(column)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RowSet {
        RowSet::from_records(
            vec!["品名".to_string(), "已生產量".to_string()],
            vec![
                vec![CellValue::text("Enzyme"), CellValue::Number(10.0)],
                vec![CellValue::text("Cartridge")],
            ],
        )
    }

    #[test]
    fn test_from_records_pads_short_records() {
        let set = sample();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows()[1].get("已生產量"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_row_get_missing_column() {
        let set = sample();
        assert_eq!(set.rows()[0].get("不存在"), None);
        assert_eq!(set.rows()[0].value_or_empty("不存在"), CellValue::Empty);
    }

    #[test]
    fn test_insert_column_front_and_overwrite() {
        let mut set = sample();
        set.insert_column(0, "index", vec![1i64.into(), 2i64.into()]);
        assert_eq!(set.columns()[0], "index");

        set.insert_column(0, "index", vec![7i64.into(), 8i64.into()]);
        assert_eq!(set.columns().len(), 3);
        assert_eq!(set.rows()[1].get("index"), Some(&CellValue::Number(8.0)));
    }
}
