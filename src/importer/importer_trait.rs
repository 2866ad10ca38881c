// ==========================================
// 製造命令前處理 - 导入 Trait
// ==========================================
// 职责: 定义活頁簿读取接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::workbook::SourceWorkbook;
use std::path::Path;

// ==========================================
// WorkbookLoader Trait
// ==========================================
// 用途: 文件 → 来源活頁簿（全部工作表）
// 实现者: ExcelLoader, CsvLoader, UniversalLoader
pub trait WorkbookLoader: Send + Sync {
    /// 读取整本活頁簿
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(SourceWorkbook): 所有工作表（以 A1 为原点）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn load(&self, file_path: &Path) -> ImportResult<SourceWorkbook>;
}
