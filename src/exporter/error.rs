// ==========================================
// 製造命令前處理 - 写出模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Excel 写出失败: {0}")]
    XlsxError(String),

    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("工作表 {sheet} 超出 Excel 上限 (行 {row}, 列 {col})")]
    SheetTooLarge { sheet: String, row: usize, col: usize },
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::XlsxError(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
