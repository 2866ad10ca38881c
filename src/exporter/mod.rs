// ==========================================
// 製造命令前處理 - 写出层
// ==========================================
// 职责: 来源活頁簿 + 处理结果 → .xlsx
// ==========================================

pub mod error;
pub mod naming;
pub mod workbook_writer;

pub use error::{ExportError, ExportResult};
pub use naming::{output_file_name, resolve_result_sheet_name, sanitize_sheet_name, table_name_for};
pub use workbook_writer::{ResultSheet, WorkbookWriter};
