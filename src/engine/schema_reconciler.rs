// ==========================================
// 製造命令前處理 - 欄位重整
// ==========================================
// 职责: 将派生后的行集映射到固定输出欄位顺序
// 红线: 输出欄位集合与顺序恒等于目标顺序；来源缺少的欄位补空值，不得省略
// ==========================================

use crate::config::TargetSchema;
use crate::domain::{CellValue, Row, RowSet};
use tracing::debug;

pub struct SchemaReconciler<'a> {
    schema: &'a TargetSchema,
}

impl<'a> SchemaReconciler<'a> {
    pub fn new(schema: &'a TargetSchema) -> Self {
        Self { schema }
    }

    /// 产生 1 起算的流水号并放在第一列
    pub fn assign_index(table: &mut RowSet, column: &str) {
        let values = (1..=table.len())
            .map(|i| CellValue::Number(i as f64))
            .collect();
        table.insert_column(0, column, values);
    }

    /// 重整欄位
    ///
    /// # 规则
    /// - 目标欄位存在于来源 → 按行对齐复制
    /// - 目标欄位不存在 → 整列填空值
    pub fn reconcile(&self, table: &RowSet) -> RowSet {
        let columns = self.schema.columns().to_vec();
        let present: Vec<bool> = columns.iter().map(|c| table.has_column(c)).collect();
        let missing: Vec<&str> = columns
            .iter()
            .zip(&present)
            .filter(|(_, present)| !**present)
            .map(|(c, _)| c.as_str())
            .collect();
        if !missing.is_empty() {
            debug!(count = missing.len(), columns = ?missing, "来源缺少的输出欄位将补空值");
        }

        let rows = table
            .rows()
            .iter()
            .map(|source| {
                let mut row = Row::new();
                for (column, present) in columns.iter().zip(&present) {
                    let value = if *present {
                        source.value_or_empty(column)
                    } else {
                        CellValue::Empty
                    };
                    row.set(column.clone(), value);
                }
                row
            })
            .collect();

        RowSet::with_rows(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TargetSchema {
        TargetSchema::new(vec![
            "index".to_string(),
            "品名".to_string(),
            "產率".to_string(),
            "備註".to_string(),
        ])
    }

    #[test]
    fn test_reconcile_orders_and_pads() {
        let table = RowSet::from_records(
            vec!["額外".to_string(), "產率".to_string(), "品名".to_string()],
            vec![vec![
                CellValue::text("x"),
                CellValue::Number(0.5),
                CellValue::text("Kit"),
            ]],
        );

        let schema = schema();
        let out = SchemaReconciler::new(&schema).reconcile(&table);

        assert_eq!(out.columns(), schema.columns());
        let row = &out.rows()[0];
        assert_eq!(row.get("品名"), Some(&CellValue::text("Kit")));
        assert_eq!(row.get("產率"), Some(&CellValue::Number(0.5)));
        assert_eq!(row.get("備註"), Some(&CellValue::Empty));
        assert_eq!(row.get("額外"), None);
    }

    #[test]
    fn test_reconcile_no_overlap_all_empty() {
        let table = RowSet::from_records(
            vec!["A".to_string()],
            vec![vec![CellValue::text("1")], vec![CellValue::text("2")]],
        );
        let schema = schema();
        let out = SchemaReconciler::new(&schema).reconcile(&table);

        assert_eq!(out.columns().len(), 4);
        assert_eq!(out.len(), 2);
        assert!(out
            .rows()
            .iter()
            .all(|r| schema.columns().iter().all(|c| r.get(c) == Some(&CellValue::Empty))));
    }

    #[test]
    fn test_assign_index_first_column() {
        let mut table = RowSet::from_records(
            vec!["品名".to_string()],
            vec![vec![CellValue::text("a")], vec![CellValue::text("b")]],
        );
        SchemaReconciler::assign_index(&mut table, "index");

        assert_eq!(table.columns()[0], "index");
        assert_eq!(
            table.column_values("index"),
            Some(vec![CellValue::Number(1.0), CellValue::Number(2.0)])
        );
    }
}
