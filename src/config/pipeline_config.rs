// ==========================================
// 製造命令前處理 - 管线配置
// ==========================================
// 职责: 输入欄位对照 / 派生欄位名 / 最终输出欄位顺序
// 红线: 配置对象不可变，显式传入编排器，不使用模块级全局常量
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// InputMapping - 输入欄位对照（读取 Excel 用）
// ==========================================
// 来源档必须包含这五个欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputMapping {
    pub id: String,          // 判断物料型態
    pub name: String,        // 判断系列項目 & 項目分類
    pub order: String,       // 判断季度 & 年份
    pub numerator: String,   // 产率分子
    pub denominator: String, // 产率分母
}

impl Default for InputMapping {
    fn default() -> Self {
        Self {
            id: "產品品號".to_string(),
            name: "品名".to_string(),
            order: "製令單號".to_string(),
            numerator: "已生產量".to_string(),
            denominator: "預計產量".to_string(),
        }
    }
}

impl InputMapping {
    /// 五个必要欄位（固定顺序: id, name, order, numerator, denominator）
    pub fn required_columns(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.order.as_str(),
            self.numerator.as_str(),
            self.denominator.as_str(),
        ]
    }
}

// ==========================================
// DerivedColumns - 派生欄位的输出名称
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedColumns {
    pub index: String,
    pub material_type: String,
    pub category_main: String,
    pub category_sub: String,
    pub quarter: String,
    pub fiscal_year: String, // 仅用于统计，默认不在输出顺序中
    pub yield_ratio: String,
}

impl Default for DerivedColumns {
    fn default() -> Self {
        Self {
            index: "index".to_string(),
            material_type: "物料型態".to_string(),
            category_main: "系列項目".to_string(),
            category_sub: "項目分類".to_string(),
            quarter: "季度".to_string(),
            fiscal_year: "年份".to_string(),
            yield_ratio: "產率".to_string(),
        }
    }
}

// ==========================================
// TargetSchema - 最终输出欄位顺序（写入 Excel 用）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetSchema {
    columns: Vec<String>,
}

const DEFAULT_TARGET_COLUMNS: &[&str] = &[
    "index", "製令單別", "單別名稱", "製令單號", "季度", "急料", "開單日期", "列印", "星期",
    "性質", "狀態碼", "類型", "物料型態", "系列項目", "項目分類", "產品品號", "品名",
    "規格", "單位", "BOM版次", "預計產量", "已領套數", "產率", "已生產量", "報廢數量",
    "備註", "BOM日期", "預計開工", "星期2", "預計完工", "星期3", "實際開工", "星期4",
    "實際完工", "星期5", "確認日", "確認者", "名稱", "生產廠別", "廠別名稱", "入庫庫別",
    "庫別名稱", "生產線別", "線別名稱", "加工廠商", "廠商名稱", "稅別碼", "稅別名稱",
    "生管/採購人員", "人員姓名", "幣別", "課稅別", "營業稅率", "價格條件", "付款條件代號",
    "付款條件名稱", "預計批號", "送貨地址", "匯率", "加工單位", "計劃批號", "母製令單別",
    "母製令單號", "訂單單別", "訂單單號", "訂單序號", "客戶代號", "客戶簡稱", "客戶單號",
    "客戶品號", "確認碼", "簽核狀態", "傳送次數", "EBO拋轉狀態", "版次", "專案代號",
    "專案名稱", "SMES整合", "SMES拋轉紀錄碼", "ISO單號",
];

impl Default for TargetSchema {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_COLUMNS.iter().map(|c| c.to_string()).collect())
    }
}

impl TargetSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

// ==========================================
// PipelineConfig - 整体配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_mapping: InputMapping,
    pub derived_columns: DerivedColumns,
    pub target_schema: TargetSchema,

    /// 标题列所在行（1 起算；Excel 第 3 列是标题）
    pub header_row: usize,

    /// 新工作表名称后缀: "{来源表}{后缀}(n)"
    pub result_sheet_suffix: String,

    /// 产率欄位的显示格式
    pub yield_number_format: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_mapping: InputMapping::default(),
            derived_columns: DerivedColumns::default(),
            target_schema: TargetSchema::default(),
            header_row: 3,
            result_sheet_suffix: "的處理結果".to_string(),
            yield_number_format: "0.00%".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_schema_shape() {
        let schema = TargetSchema::default();
        assert_eq!(schema.len(), 80);
        assert_eq!(schema.columns()[0], "index");
        assert_eq!(schema.columns().last().map(String::as_str), Some("ISO單號"));
        assert_eq!(schema.position("產率"), Some(22));
    }

    #[test]
    fn test_default_schema_contains_derived_outputs_but_not_year() {
        let schema = TargetSchema::default();
        let derived = DerivedColumns::default();
        for col in [
            &derived.index,
            &derived.material_type,
            &derived.category_main,
            &derived.category_sub,
            &derived.quarter,
            &derived.yield_ratio,
        ] {
            assert!(schema.position(col).is_some(), "缺少派生欄位 {}", col);
        }
        assert!(schema.position(&derived.fiscal_year).is_none());
    }

    #[test]
    fn test_required_columns_order() {
        let mapping = InputMapping::default();
        assert_eq!(
            mapping.required_columns(),
            ["產品品號", "品名", "製令單號", "已生產量", "預計產量"]
        );
    }
}
