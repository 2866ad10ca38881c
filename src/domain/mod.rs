// ==========================================
// 製造命令前處理 - 领域模型层
// ==========================================
// 职责: 单元格/行/行集、分类枚举、年度统计
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod cell;
pub mod row;
pub mod summary;
pub mod types;

// 重导出核心类型
pub use cell::CellValue;
pub use row::{Row, RowSet};
pub use summary::YearSummary;
pub use types::{CategoryMain, CategorySub, Classification, Quarter, RunStatus};
