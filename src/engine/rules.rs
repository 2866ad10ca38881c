// ==========================================
// 製造命令前處理 - 规则引擎
// ==========================================
// 职责: 物料型態 / 系列項目 & 項目分類 / 季度 / 年份 / 產率 派生
// 红线: 每个规则函数都是全函数，不 panic，不向外抛错
//       转换失败一律替换为默认值（空字符串或 0）
// ==========================================

use crate::domain::{CategoryMain, CategorySub, CellValue, Classification, Quarter};
use crate::engine::error::MalformedValueError;
use crate::engine::field_extractor::ExtractedFields;
use tracing::debug;

// ===== 系列項目关键字（按优先级） =====
const EXTRACTION_KEYWORDS: &[&str] = &["extraction", "cartridge"];
const FORMULATED_KEYWORDS: &[&str] = &[
    "pockit", "iq", "dntp", "enzyme", "trehalose", "sedingin", "camap",
];
const TACO_KEYWORD: &str = "taco";
const IVD_KEYWORD: &str = "ivd";

// ===== 項目分類关键字（配方試劑，按顺序） =====
const IQ_PLUS_POCKIT_KEYWORDS: &[&str] = &["enzyme", "dntp", "iq plus", "pockit"];
const POCKIT_CENTRAL_KEYWORDS: &[&str] = &["pockit central", "sedingin"];
const IQ_2000_KEYWORDS: &[&str] = &["camap", "iq200", "iq 2000"];
const IQ_REAL_KEYWORD: &str = "iq real";

/// 试剂类的物料型態值（整串比较，非首字符）
const REAGENT_MATERIAL_TYPE: &str = "a";

/// 单行派生结果
#[derive(Debug, Clone, PartialEq)]
pub struct RowDerivation {
    pub material_type: String,
    pub classification: Classification,
    pub quarter: Option<Quarter>,
    pub fiscal_year: String,
    pub yield_ratio: f64,
}

impl RowDerivation {
    pub fn quarter_label(&self) -> String {
        self.quarter.map(|q| q.to_string()).unwrap_or_default()
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// ==========================================
// RuleEngine - 规则引擎
// ==========================================
pub struct RuleEngine;

impl RuleEngine {
    /// 派生整行（物料型態必须先于分类计算）
    pub fn derive_row(&self, fields: &ExtractedFields) -> RowDerivation {
        let material_type = self.derive_material_type(&fields.id);
        let classification = self.classify(&fields.name, &material_type);

        RowDerivation {
            classification,
            quarter: self.derive_quarter(&fields.order),
            fiscal_year: self.derive_fiscal_year(&fields.order),
            yield_ratio: self.compute_yield(&fields.numerator, &fields.denominator),
            material_type,
        }
    }

    /// 派生物料型態
    ///
    /// # 规则
    /// - 产品品号字符串形式去除首尾空白后整串返回（不是取第 1 码）
    /// - 空值 → ""
    pub fn derive_material_type(&self, id: &CellValue) -> String {
        id.to_string().trim().to_string()
    }

    /// 计算系列項目 & 項目分類
    ///
    /// # 规则
    /// 1. 物料型態（小写）不等于 "a" → (非試劑類, 无)
    /// 2. 系列項目按关键字优先级命中第一组:
    ///    extraction/cartridge → 核酸萃取; pockit/iq/dntp/enzyme/trehalose/sedingin/camap → 配方試劑;
    ///    taco → 核酸萃取; ivd → IVD; 其他 → 核酸萃取
    /// 3. 項目分類依系列項目再做一轮关键字判断
    ///
    /// 关键字为不区分大小写的子串匹配（不做词边界）
    pub fn classify(&self, name: &CellValue, material_type: &str) -> Classification {
        if material_type.to_lowercase() != REAGENT_MATERIAL_TYPE {
            return Classification::non_reagent();
        }

        let name = name.to_string().to_lowercase();
        let name = name.trim();

        let main = if contains_any(name, EXTRACTION_KEYWORDS) {
            CategoryMain::NucleicAcidExtraction
        } else if contains_any(name, FORMULATED_KEYWORDS) {
            CategoryMain::FormulatedReagent
        } else if name.contains(TACO_KEYWORD) {
            CategoryMain::NucleicAcidExtraction
        } else if name.contains(IVD_KEYWORD) {
            CategoryMain::Ivd
        } else {
            CategoryMain::NucleicAcidExtraction
        };

        let sub = match main {
            CategoryMain::NucleicAcidExtraction => {
                if name.contains("cartridge") {
                    Some(CategorySub::PockitCentralRelated)
                } else {
                    Some(CategorySub::Extraction)
                }
            }
            CategoryMain::FormulatedReagent => {
                if contains_any(name, IQ_PLUS_POCKIT_KEYWORDS) {
                    Some(CategorySub::IqPlusPockit)
                } else if contains_any(name, POCKIT_CENTRAL_KEYWORDS) {
                    Some(CategorySub::PockitCentral)
                } else if contains_any(name, IQ_2000_KEYWORDS) {
                    Some(CategorySub::Iq2000)
                } else if name.contains(IQ_REAL_KEYWORD) {
                    Some(CategorySub::IqReal)
                } else {
                    None
                }
            }
            CategoryMain::Ivd | CategoryMain::NonReagent => None,
        };

        Classification::new(main, sub)
    }

    /// 派生季度；任何转换失败 → None
    pub fn derive_quarter(&self, order: &CellValue) -> Option<Quarter> {
        match parse_quarter(order) {
            Ok(q) => Some(q),
            Err(e) => {
                debug!(order = %order, reason = %e, "季度无法派生，留空");
                None
            }
        }
    }

    /// 派生年份: 製令單號字符串形式的前 4 个字符
    pub fn derive_fiscal_year(&self, order: &CellValue) -> String {
        order.to_string().chars().take(4).collect()
    }

    /// 计算产率
    ///
    /// # 规则
    /// - 分母非 0 → 分子 / 分母
    /// - 分母为 0 → 0
    /// - 任一值无法转换为数值 → 0
    pub fn compute_yield(&self, numerator: &CellValue, denominator: &CellValue) -> f64 {
        match try_yield(numerator, denominator) {
            Ok(ratio) => ratio,
            Err(e) => {
                debug!(reason = %e, "产率无法计算，记为 0");
                0.0
            }
        }
    }
}

fn coerce_number(value: &CellValue) -> Result<f64, MalformedValueError> {
    let number = value
        .as_number()
        .ok_or_else(|| MalformedValueError::NotNumeric(value.to_string()))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(MalformedValueError::NonFinite(number))
    }
}

fn try_yield(numerator: &CellValue, denominator: &CellValue) -> Result<f64, MalformedValueError> {
    let num = coerce_number(numerator)?;
    let den = coerce_number(denominator)?;
    if den == 0.0 {
        return Ok(0.0);
    }

    let ratio = num / den;
    if ratio.is_finite() {
        Ok(ratio)
    } else {
        Err(MalformedValueError::NonFinite(ratio))
    }
}

fn parse_quarter(order: &CellValue) -> Result<Quarter, MalformedValueError> {
    let text = order.to_string();
    let chars: Vec<char> = text.trim().chars().collect();
    if chars.len() < 6 {
        return Err(MalformedValueError::OrderTooShort(text));
    }

    let month_text: String = chars[4..6].iter().collect();
    let month = month_text
        .trim()
        .parse::<i64>()
        .map_err(|_| MalformedValueError::MonthNotNumeric(month_text.clone()))?;

    Quarter::from_month(month).ok_or(MalformedValueError::MonthOutOfRange(month))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(name: &str, material_type: &str) -> Classification {
        RuleEngine.classify(&CellValue::text(name), material_type)
    }

    #[test]
    fn test_material_type_is_trimmed_whole_string() {
        let engine = RuleEngine;
        assert_eq!(engine.derive_material_type(&CellValue::text("  A12345 ")), "A12345");
        assert_eq!(engine.derive_material_type(&CellValue::Number(123.0)), "123");
        assert_eq!(engine.derive_material_type(&CellValue::Empty), "");
    }

    #[test]
    fn test_non_reagent_short_circuit() {
        let c = classify("POCKIT enzyme", "A12345");
        assert_eq!(c, Classification::non_reagent());

        // 整串比较，不是前缀
        let c = classify("POCKIT enzyme", "a99");
        assert_eq!(c.main, CategoryMain::NonReagent);
        assert_eq!(c.sub_label(), "");
    }

    #[test]
    fn test_material_type_gate_case_insensitive() {
        let c = classify("Enzyme Mix", "A");
        assert_eq!(c.main, CategoryMain::FormulatedReagent);
    }

    #[test]
    fn test_cartridge_wins_over_pockit() {
        let c = classify("POCKIT Cartridge", "a");
        assert_eq!(c.main, CategoryMain::NucleicAcidExtraction);
        assert_eq!(c.sub, Some(CategorySub::PockitCentralRelated));
    }

    #[test]
    fn test_extraction_sub_default() {
        assert_eq!(
            classify("DNA extraction kit", "a").sub,
            Some(CategorySub::Extraction)
        );
        assert_eq!(classify("taco plate", "a").sub, Some(CategorySub::Extraction));
        assert_eq!(
            classify("something else", "a"),
            Classification::new(
                CategoryMain::NucleicAcidExtraction,
                Some(CategorySub::Extraction)
            )
        );
    }

    #[test]
    fn test_ivd() {
        assert_eq!(
            classify("IVD control", "a"),
            Classification::new(CategoryMain::Ivd, None)
        );
    }

    #[test]
    fn test_formulated_subcategories() {
        assert_eq!(classify("dNTP mix", "a").sub, Some(CategorySub::IqPlusPockit));
        // "pockit" 先命中 C，"pockit central" 实际只能经由 sedingin 进入 D
        assert_eq!(
            classify("POCKIT Central buffer", "a").sub,
            Some(CategorySub::IqPlusPockit)
        );
        assert_eq!(classify("Sedingin", "a").sub, Some(CategorySub::PockitCentral));
        assert_eq!(classify("CAMAP reagent", "a").sub, Some(CategorySub::Iq2000));
        assert_eq!(classify("IQ 2000 kit", "a").sub, Some(CategorySub::Iq2000));
        assert_eq!(classify("iq real kit", "a").sub, Some(CategorySub::IqReal));
        assert_eq!(classify("trehalose", "a").sub, None);
    }

    #[test]
    fn test_unanchored_substring_match() {
        // "iq" 出现在 "liquid" 中
        assert_eq!(
            classify("Liquid handler", "a").main,
            CategoryMain::FormulatedReagent
        );
    }

    #[test]
    fn test_quarter_edge_cases() {
        let engine = RuleEngine;
        assert_eq!(engine.derive_quarter(&CellValue::Empty), None);
        assert_eq!(engine.derive_quarter(&CellValue::text("12345")), None);
        assert_eq!(engine.derive_quarter(&CellValue::text("202403XX")), Some(Quarter::Q1));
        assert_eq!(engine.derive_quarter(&CellValue::text("202313XX")), None);
        assert_eq!(engine.derive_quarter(&CellValue::text("2024ABXX")), None);
        assert_eq!(
            engine.derive_quarter(&CellValue::Number(20241105001.0)),
            Some(Quarter::Q4)
        );
    }

    #[test]
    fn test_fiscal_year() {
        let engine = RuleEngine;
        assert_eq!(engine.derive_fiscal_year(&CellValue::text("20240315001")), "2024");
        assert_eq!(engine.derive_fiscal_year(&CellValue::Number(20230101.0)), "2023");
        assert_eq!(engine.derive_fiscal_year(&CellValue::text("20")), "20");
        assert_eq!(engine.derive_fiscal_year(&CellValue::Empty), "");
    }

    #[test]
    fn test_yield_total() {
        let engine = RuleEngine;
        assert_eq!(
            engine.compute_yield(&CellValue::Number(5.0), &CellValue::Number(0.0)),
            0.0
        );
        assert_eq!(
            engine.compute_yield(&CellValue::text("abc"), &CellValue::Number(2.0)),
            0.0
        );
        assert_eq!(
            engine.compute_yield(&CellValue::Number(3.0), &CellValue::Number(4.0)),
            0.75
        );
        assert_eq!(
            engine.compute_yield(&CellValue::text(" 3 "), &CellValue::text("4")),
            0.75
        );
        assert_eq!(engine.compute_yield(&CellValue::Empty, &CellValue::Number(4.0)), 0.0);
        assert_eq!(
            engine.compute_yield(&CellValue::text("nan"), &CellValue::Number(4.0)),
            0.0
        );
        assert_eq!(
            engine.compute_yield(&CellValue::Number(1.0), &CellValue::text("inf")),
            0.0
        );
    }
}
