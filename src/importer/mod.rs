// ==========================================
// 製造命令前處理 - 导入层
// ==========================================
// 职责: 文件 → 来源活頁簿 → 资料表（行集）
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod table_reader;
pub mod workbook;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvLoader, ExcelLoader, UniversalLoader};
pub use importer_trait::WorkbookLoader;
pub use table_reader::read_table;
pub use workbook::{SheetGrid, SourceWorkbook};
