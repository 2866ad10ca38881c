// ==========================================
// 製造命令前處理 - 配置层
// ==========================================
// 职责: 输入欄位对照、输出欄位顺序、标题列偏移等配置
// 存储: JSON 文件（可选），缺省为内建默认值
// ==========================================

pub mod config_manager;
pub mod pipeline_config;

// 重导出核心配置
pub use config_manager::{ConfigError, ConfigManager, ConfigResult};
pub use pipeline_config::{DerivedColumns, InputMapping, PipelineConfig, TargetSchema};
