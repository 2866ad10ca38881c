// ==========================================
// 製造命令前處理 - 管线编排器
// ==========================================
// 用途: 依序执行 流水号 → 必要欄位校验 → 欄位提取+规则派生 → 年度统计 → 欄位重整
// 红线: 校验失败时不做任何派生，不返回部分结果
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::{CellValue, RowSet, YearSummary};
use crate::engine::aggregator::YearAggregator;
use crate::engine::error::SchemaValidationError;
use crate::engine::field_extractor::FieldExtractor;
use crate::engine::rules::{RowDerivation, RuleEngine};
use crate::engine::schema_reconciler::SchemaReconciler;
use tracing::{info, instrument, warn};

// ==========================================
// ProcessOutput - 处理结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    /// 按目标欄位顺序重整后的行集
    pub table: RowSet,

    /// 年份 → 笔数
    pub summary: YearSummary,
}

// ==========================================
// PipelineOrchestrator - 管线编排器
// ==========================================
pub struct PipelineOrchestrator<'a> {
    config: &'a PipelineConfig,
    rules: RuleEngine,
    aggregator: YearAggregator,
}

impl<'a> PipelineOrchestrator<'a> {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 管线配置（只读）
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            rules: RuleEngine,
            aggregator: YearAggregator,
        }
    }

    /// 执行完整处理流程
    ///
    /// # 参数
    /// - table: 来源行集（按值传入，本次调用独占）
    ///
    /// # 返回
    /// - Ok(ProcessOutput): 重整后的行集 + 年度统计
    /// - Err(SchemaValidationError): 缺少必要输入欄位
    #[instrument(skip(self, table), fields(rows = table.len()))]
    pub fn process(&self, mut table: RowSet) -> Result<ProcessOutput, SchemaValidationError> {
        let derived = &self.config.derived_columns;

        // ===== 1. 产生流水号 =====
        SchemaReconciler::assign_index(&mut table, &derived.index);

        // ===== 2. 检查必要欄位 =====
        self.validate_required(&table)?;

        // ===== 3. 欄位提取 + 规则派生 =====
        let derivations = self.derive_rows(&table);
        self.apply_derivations(&mut table, &derivations);

        // ===== 4. 年度统计 =====
        let summary = self
            .aggregator
            .aggregate(derivations.iter().map(|d| d.fiscal_year.as_str()));

        // ===== 5. 欄位重整 =====
        let reconciled = SchemaReconciler::new(&self.config.target_schema).reconcile(&table);

        info!(
            rows = reconciled.len(),
            columns = reconciled.columns().len(),
            years = %summary,
            "处理完成"
        );

        Ok(ProcessOutput {
            table: reconciled,
            summary,
        })
    }

    /// 检查五个必要输入欄位是否都存在
    pub fn validate_required(&self, table: &RowSet) -> Result<(), SchemaValidationError> {
        let missing: Vec<String> = self
            .config
            .input_mapping
            .required_columns()
            .iter()
            .filter(|c| !table.has_column(c))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            warn!(missing = ?missing, "来源表缺少必要欄位");
            Err(SchemaValidationError::new(missing))
        }
    }

    fn derive_rows(&self, table: &RowSet) -> Vec<RowDerivation> {
        let extractor = FieldExtractor::new(&self.config.input_mapping);
        table
            .rows()
            .iter()
            .map(|row| self.rules.derive_row(&extractor.extract(row)))
            .collect()
    }

    fn apply_derivations(&self, table: &mut RowSet, derivations: &[RowDerivation]) {
        let derived = &self.config.derived_columns;
        for column in [
            &derived.material_type,
            &derived.category_main,
            &derived.category_sub,
            &derived.quarter,
            &derived.fiscal_year,
            &derived.yield_ratio,
        ] {
            table.ensure_column(column);
        }

        for (row, d) in table.rows_mut().iter_mut().zip(derivations) {
            row.set(
                derived.material_type.as_str(),
                CellValue::text(d.material_type.as_str()),
            );
            row.set(
                derived.category_main.as_str(),
                CellValue::text(d.classification.main.label()),
            );
            row.set(
                derived.category_sub.as_str(),
                CellValue::text(d.classification.sub_label()),
            );
            row.set(derived.quarter.as_str(), CellValue::text(d.quarter_label()));
            row.set(
                derived.fiscal_year.as_str(),
                CellValue::text(d.fiscal_year.as_str()),
            );
            row.set(derived.yield_ratio.as_str(), CellValue::Number(d.yield_ratio));
        }
    }
}

/// 便捷入口: 以给定配置处理一张表
pub fn process(
    table: RowSet,
    config: &PipelineConfig,
) -> Result<ProcessOutput, SchemaValidationError> {
    PipelineOrchestrator::new(config).process(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Row;

    fn input_row(id: &str, name: &str, order: &str, num: f64, den: f64) -> Row {
        Row::from_pairs([
            ("產品品號", CellValue::text(id)),
            ("品名", CellValue::text(name)),
            ("製令單號", CellValue::text(order)),
            ("已生產量", CellValue::Number(num)),
            ("預計產量", CellValue::Number(den)),
        ])
    }

    fn input_table(rows: Vec<Row>) -> RowSet {
        RowSet::with_rows(
            ["產品品號", "品名", "製令單號", "已生產量", "預計產量"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows,
        )
    }

    #[test]
    fn test_process_derives_and_reconciles() {
        let config = PipelineConfig::default();
        let table = input_table(vec![
            input_row("a", "POCKIT Cartridge", "20240315001", 80.0, 100.0),
            input_row("B001", "Enzyme", "20230801002", 1.0, 0.0),
        ]);

        let out = process(table, &config).unwrap();

        assert_eq!(out.table.columns(), config.target_schema.columns());
        let first = &out.table.rows()[0];
        assert_eq!(first.get("index"), Some(&CellValue::Number(1.0)));
        assert_eq!(first.get("物料型態"), Some(&CellValue::text("a")));
        assert_eq!(first.get("系列項目"), Some(&CellValue::text("核酸萃取")));
        assert_eq!(
            first.get("項目分類"),
            Some(&CellValue::text("POCKIT Central (相關)"))
        );
        assert_eq!(first.get("季度"), Some(&CellValue::text("Q1")));
        assert_eq!(first.get("產率"), Some(&CellValue::Number(0.8)));

        let second = &out.table.rows()[1];
        assert_eq!(second.get("index"), Some(&CellValue::Number(2.0)));
        assert_eq!(second.get("系列項目"), Some(&CellValue::text("非試劑類")));
        assert_eq!(second.get("項目分類"), Some(&CellValue::Empty));
        assert_eq!(second.get("季度"), Some(&CellValue::text("Q3")));
        assert_eq!(second.get("產率"), Some(&CellValue::Number(0.0)));

        assert_eq!(out.summary.get("2023"), Some(1));
        assert_eq!(out.summary.get("2024"), Some(1));
        // 年份只用于统计，不输出
        assert_eq!(first.get("年份"), None);
    }

    #[test]
    fn test_process_missing_columns() {
        let config = PipelineConfig::default();
        let table = RowSet::from_records(
            vec!["產品品號".to_string(), "製令單號".to_string()],
            vec![vec![CellValue::text("a"), CellValue::text("20240101")]],
        );

        let err = process(table, &config).unwrap_err();
        assert_eq!(
            err.missing_columns(),
            &["品名".to_string(), "已生產量".to_string(), "預計產量".to_string()]
        );
    }

    #[test]
    fn test_process_empty_table() {
        let config = PipelineConfig::default();
        let out = process(input_table(Vec::new()), &config).unwrap();
        assert!(out.table.is_empty());
        assert_eq!(out.table.columns().len(), 80);
        assert!(out.summary.is_empty());
    }
}
