// ==========================================
// 製造命令前處理 - 欄位提取器
// ==========================================
// 职责: 按输入欄位对照，从任意形状的行中取出五个逻辑值
// 红线: 欄位不存在视为空值，不报错
// ==========================================

use crate::config::InputMapping;
use crate::domain::{CellValue, Row};

/// 一行中的五个逻辑输入值
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedFields {
    pub id: CellValue,
    pub name: CellValue,
    pub order: CellValue,
    pub numerator: CellValue,
    pub denominator: CellValue,
}

pub struct FieldExtractor<'a> {
    mapping: &'a InputMapping,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(mapping: &'a InputMapping) -> Self {
        Self { mapping }
    }

    pub fn extract(&self, row: &Row) -> ExtractedFields {
        ExtractedFields {
            id: row.value_or_empty(&self.mapping.id),
            name: row.value_or_empty(&self.mapping.name),
            order: row.value_or_empty(&self.mapping.order),
            numerator: row.value_or_empty(&self.mapping.numerator),
            denominator: row.value_or_empty(&self.mapping.denominator),
        }
    }
}
