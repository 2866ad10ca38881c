// ==========================================
// 製造命令前處理 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 必要输入欄位缺失（终止本次处理，不产生部分结果）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Excel 中找不到這些欄位：{missing:?}。請確認標題列是否正確。")]
pub struct SchemaValidationError {
    pub missing: Vec<String>,
}

impl SchemaValidationError {
    pub fn new(missing: Vec<String>) -> Self {
        Self { missing }
    }

    pub fn missing_columns(&self) -> &[String] {
        &self.missing
    }
}

/// 单元格转换失败（引擎内部使用，不向外传播）
///
/// 规则函数遇到此错误时一律替换为文档约定的默认值（空字符串或 0）。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedValueError {
    #[error("无法转换为数值: {0:?}")]
    NotNumeric(String),

    #[error("数值非有限值: {0}")]
    NonFinite(f64),

    #[error("製令單號长度不足 6 码: {0:?}")]
    OrderTooShort(String),

    #[error("月份无法解析: {0:?}")]
    MonthNotNumeric(String),

    #[error("月份超出范围 1..=12: {0}")]
    MonthOutOfRange(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_validation_message_lists_columns() {
        let err = SchemaValidationError::new(vec!["品名".to_string(), "預計產量".to_string()]);
        let msg = err.to_string();
        assert!(msg.contains("品名"));
        assert!(msg.contains("預計產量"));
        assert!(msg.starts_with("Excel 中找不到這些欄位"));
    }
}
