// ==========================================
// 製造命令前處理 - 应用层
// ==========================================
// 职责: 串接 导入 → 引擎 → 写出 → 运行日志
// ==========================================

pub mod error;
pub mod runner;

// 重导出
pub use error::{AppError, AppResult};
pub use runner::{run, RunOutcome, RunRequest, Runner};
