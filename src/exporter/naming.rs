// ==========================================
// 製造命令前處理 - 工作表/表格/文件命名
// ==========================================
// 规则:
// - 新工作表: "{来源表}{后缀}(n)"，n 从 1 递增直到不与现有工作表重名
// - Excel 工作表名上限 31 字符，超出时截断来源表部分
// - 输出文件: "Processed_{原文件名}"，扩展名固定为 .xlsx
// ==========================================

use std::path::Path;

/// Excel 工作表名长度上限
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// 决定新工作表名称（重名时数字后缀递增，比较不区分大小写）
pub fn resolve_result_sheet_name(existing: &[String], source_sheet: &str, suffix: &str) -> String {
    let base = format!("{}{}", source_sheet, suffix);
    let taken: Vec<String> = existing.iter().map(|s| s.to_lowercase()).collect();

    let mut count = 1usize;
    loop {
        let tag = format!("({})", count);
        let room = MAX_SHEET_NAME_CHARS.saturating_sub(tag.chars().count());
        let candidate = format!("{}{}", truncate_chars(&base, room), tag);
        if !taken.contains(&candidate.to_lowercase()) {
            return candidate;
        }
        count += 1;
    }
}

/// 来源工作表名称清理（CSV 文件名等可能含 Excel 不允许的字符）
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches('\'');
    let cleaned = truncate_chars(cleaned, MAX_SHEET_NAME_CHARS);
    if cleaned.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

/// 表格名称: "Table_" + 工作表名中的 ASCII 字母数字（括号/空白/符号转为 "_"）
pub fn table_name_for(sheet_name: &str) -> String {
    let body: String = sheet_name
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else if c.is_ascii() {
                Some('_')
            } else {
                None
            }
        })
        .collect();
    format!("Table_{}", body)
}

/// 输出文件名
pub fn output_file_name(input_file_name: &str) -> String {
    let stem = Path::new(input_file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| input_file_name.to_string());
    format!("Processed_{}.xlsx", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_sheet_name_first_free_suffix() {
        let existing = vec!["製令".to_string()];
        assert_eq!(
            resolve_result_sheet_name(&existing, "製令", "的處理結果"),
            "製令的處理結果(1)"
        );

        let existing = vec![
            "製令".to_string(),
            "製令的處理結果(1)".to_string(),
            "製令的處理結果(2)".to_string(),
        ];
        assert_eq!(
            resolve_result_sheet_name(&existing, "製令", "的處理結果"),
            "製令的處理結果(3)"
        );
    }

    #[test]
    fn test_result_sheet_name_truncated_to_excel_limit() {
        let long = "A".repeat(40);
        let name = resolve_result_sheet_name(&[], &long, "的處理結果");
        assert_eq!(name.chars().count(), MAX_SHEET_NAME_CHARS);
        assert!(name.ends_with("(1)"));
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("a/b:c"), "a_b_c");
        assert_eq!(sanitize_sheet_name("''"), "Sheet1");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).chars().count(), 31);
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name_for("Sheet1的處理結果(1)"), "Table_Sheet1_1_");
        assert_eq!(table_name_for("製令的處理結果(2)"), "Table__2_");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("orders.xlsx"), "Processed_orders.xlsx");
        assert_eq!(output_file_name("orders.xlsm"), "Processed_orders.xlsx");
        assert_eq!(output_file_name("orders.csv"), "Processed_orders.xlsx");
    }
}
