// ==========================================
// 製造命令單頭資料前處理 - 核心库
// ==========================================
// 功能: 读取製令 Excel → 派生 物料型態/系列項目/項目分類/季度/產率 →
//       按固定欄位顺序重整 → 写回活頁簿（保留原工作表）+ 年度统计
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 储存格/行集/分类类型
pub mod domain;

// 配置层 - 欄位对照与目标欄位
pub mod config;

// 引擎层 - 规则派生与欄位重整
pub mod engine;

// 导入层 - Excel/CSV
pub mod importer;

// 写出层 - xlsx
pub mod exporter;

// 运行日志
pub mod run_log;

// 应用层 - 单次处理执行
pub mod app;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CategoryMain, CategorySub, CellValue, Classification, Quarter, Row, RowSet, RunStatus,
    YearSummary,
};

// 配置
pub use config::{ConfigManager, PipelineConfig};

// 引擎
pub use engine::{process, PipelineOrchestrator, ProcessOutput, RuleEngine, SchemaValidationError};

// 应用
pub use app::{AppError, RunOutcome, RunRequest, Runner};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "製造命令單頭資料前處理";
