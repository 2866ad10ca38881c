// ==========================================
// 製造命令前處理 - 引擎层
// ==========================================
// 职责: 欄位提取、规则派生、年度统计、欄位重整、流程编排
// 红线: 引擎只处理内存中的行集，不读写文件
// ==========================================

pub mod aggregator;
pub mod error;
pub mod field_extractor;
pub mod orchestrator;
pub mod rules;
pub mod schema_reconciler;

// 重导出核心引擎
pub use aggregator::YearAggregator;
pub use error::{MalformedValueError, SchemaValidationError};
pub use field_extractor::{ExtractedFields, FieldExtractor};
pub use orchestrator::{process, PipelineOrchestrator, ProcessOutput};
pub use rules::{RowDerivation, RuleEngine};
pub use schema_reconciler::SchemaReconciler;
