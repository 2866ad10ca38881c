// ==========================================
// 製造命令前處理 - 运行日志
// ==========================================
// 职责: 每次处理追加一行文字记录（只追加，不改写）
// 格式: [YYYY-MM-DD HH:MM:SS] {文件} | {状态} | {讯息}
// ==========================================

use crate::domain::RunStatus;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FIELD_SEPARATOR: &str = " | ";
const LOG_FILE_NAME: &str = "process_log.txt";

#[derive(Error, Debug)]
pub enum RunLogError {
    #[error("运行日志读写失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ==========================================
// RunLogEntry - 单次处理记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLogEntry {
    pub timestamp: NaiveDateTime,
    pub file: String,
    pub status: RunStatus,
    pub message: String,
}

impl RunLogEntry {
    /// 以当前本地时间建立记录
    pub fn now(file: impl Into<String>, status: RunStatus, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            file: file.into(),
            status,
            message: message.into(),
        }
    }

    /// 序列化为单行（讯息中的换行替换为空白）
    pub fn to_line(&self) -> String {
        let message = self.message.replace(['\r', '\n'], " ");
        format!(
            "[{}] {}{sep}{}{sep}{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.file,
            self.status,
            message,
            sep = FIELD_SEPARATOR
        )
    }

    /// 解析单行；格式不符返回 None
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (ts, rest) = rest.split_once("] ")?;
        let timestamp = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;

        let mut parts = rest.splitn(3, FIELD_SEPARATOR);
        let file = parts.next()?.to_string();
        let status = parts.next()?.parse::<RunStatus>().ok()?;
        let message = parts.next().unwrap_or_default().to_string();

        Some(Self {
            timestamp,
            file,
            status,
            message,
        })
    }
}

// ==========================================
// RunLog - 运行日志文件
// ==========================================
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认日志位置
    ///
    /// 优先级: WORK_ORDER_PREP_LOG_PATH > 用户数据目录 > 当前目录
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("WORK_ORDER_PREP_LOG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        match dirs::data_dir() {
            Some(data_dir) => data_dir.join("work-order-prep").join(LOG_FILE_NAME),
            None => PathBuf::from(LOG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加一条记录（父目录不存在时自动建立）
    pub fn append(&self, entry: &RunLogEntry) -> Result<(), RunLogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{}", entry.to_line()).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), status = %entry.status, "运行日志已追加");
        Ok(())
    }

    /// 读取所有记录（文件不存在视为空；无法解析的行跳过）
    pub fn entries(&self) -> Result<Vec<RunLogEntry>, RunLogError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut entries = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match RunLogEntry::parse_line(line) {
                Some(entry) => entries.push(entry),
                None => warn!(line = line_no + 1, "运行日志行格式无法解析，已跳过"),
            }
        }
        Ok(entries)
    }

    fn io_error(&self, source: std::io::Error) -> RunLogError {
        RunLogError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
