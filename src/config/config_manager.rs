// ==========================================
// 製造命令前處理 - 配置管理器
// ==========================================
// 职责: 配置加载（JSON 文件 / 默认值）+ 合法性校验
// 存储: 可选 JSON 文件，缺省字段回落到内建默认值
// ==========================================

use crate::config::pipeline_config::PipelineConfig;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值不合法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - path: JSON 配置文件路径；None 时使用内建默认值
    ///
    /// # 返回
    /// - Ok(PipelineConfig): 已通过校验的配置
    /// - Err: 读取/解析/校验失败
    pub fn load(path: Option<&Path>) -> ConfigResult<PipelineConfig> {
        let config = match path {
            None => {
                debug!("未指定配置文件，使用内建默认配置");
                PipelineConfig::default()
            }
            Some(path) => {
                let shown = path.display().to_string();
                let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                    path: shown.clone(),
                    message: e.to_string(),
                })?;
                let config = Self::from_json(&raw).map_err(|e| match e {
                    ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                        path: shown.clone(),
                        message,
                    },
                    other => other,
                })?;
                info!(path = %shown, "已加载配置文件");
                config
            }
        };

        Self::validate(&config)?;
        Ok(config)
    }

    /// 从 JSON 文本解析（缺省字段使用默认值）
    pub fn from_json(raw: &str) -> ConfigResult<PipelineConfig> {
        serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// 校验配置
    ///
    /// # 规则
    /// - 五个输入欄位名不得为空
    /// - 输出欄位顺序不得为空，且欄位名不得为空或重复
    /// - header_row 从 1 起算
    pub fn validate(config: &PipelineConfig) -> ConfigResult<()> {
        let mapping = &config.input_mapping;
        let roles = ["id", "name", "order", "numerator", "denominator"];
        for (role, column) in roles.iter().zip(mapping.required_columns()) {
            if column.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("input_mapping.{}", role),
                    message: "欄位名不得为空".to_string(),
                });
            }
        }

        let schema = &config.target_schema;
        if schema.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "target_schema".to_string(),
                message: "输出欄位顺序不得为空".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for column in schema.columns() {
            if column.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "target_schema".to_string(),
                    message: "输出欄位名不得为空".to_string(),
                });
            }
            if !seen.insert(column.as_str()) {
                return Err(ConfigError::InvalidValue {
                    key: "target_schema".to_string(),
                    message: format!("输出欄位重复: {}", column),
                });
            }
        }

        if config.header_row == 0 {
            return Err(ConfigError::InvalidValue {
                key: "header_row".to_string(),
                message: "标题列行号从 1 起算".to_string(),
            });
        }

        Ok(())
    }
}
