// ==========================================
// 製造命令前處理 - 应用层错误类型
// ==========================================
// 职责: 汇总导入/处理/写出错误，并对应运行日志状态
// ==========================================

use crate::domain::RunStatus;
use crate::engine::SchemaValidationError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error("读取失败: {0}")]
    Import(#[from] ImportError),

    #[error("写出失败: {0}")]
    Export(#[from] ExportError),
}

impl AppError {
    /// 运行日志状态: 欄位校验失败 → FAILED，其余 → ERROR
    pub fn run_status(&self) -> RunStatus {
        match self {
            AppError::Schema(_) => RunStatus::Failed,
            AppError::Import(_) | AppError::Export(_) => RunStatus::Error,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
