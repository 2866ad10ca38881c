// ==========================================
// 製造命令前處理 - 处理执行器
// ==========================================
// 流程: 读取活頁簿 → 选择工作表 → 读取资料表 → 管线处理 → 写出活頁簿 → 追加运行日志
// 红线: 每次执行（成功或失败）都写一行运行日志
// ==========================================

use crate::app::error::AppResult;
use crate::config::PipelineConfig;
use crate::domain::{RunStatus, YearSummary};
use crate::engine::PipelineOrchestrator;
use crate::exporter::{
    output_file_name, resolve_result_sheet_name, sanitize_sheet_name, ResultSheet, WorkbookWriter,
};
use crate::importer::{read_table, SourceWorkbook, UniversalLoader, WorkbookLoader};
use crate::run_log::{RunLog, RunLogEntry};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RunRequest - 执行请求
// ==========================================
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// 来源文件
    pub input: PathBuf,

    /// 来源工作表（None = 第一个工作表）
    pub sheet: Option<String>,

    /// 输出文件（None = 来源目录下的 Processed_{文件名}.xlsx）
    pub output: Option<PathBuf>,
}

impl RunRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            sheet: None,
            output: None,
        }
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

// ==========================================
// RunOutcome - 执行结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: String,
    pub output_path: PathBuf,
    pub source_sheet: String,
    pub result_sheet: String,
    pub rows: usize,
    pub summary: YearSummary,
}

// ==========================================
// Runner - 处理执行器
// ==========================================
pub struct Runner {
    config: PipelineConfig,
    loader: Box<dyn WorkbookLoader>,
    run_log: RunLog,
}

impl Runner {
    pub fn new(config: PipelineConfig, run_log: RunLog) -> Self {
        Self::with_loader(config, run_log, Box::new(UniversalLoader))
    }

    pub fn with_loader(
        config: PipelineConfig,
        run_log: RunLog,
        loader: Box<dyn WorkbookLoader>,
    ) -> Self {
        Self {
            config,
            loader,
            run_log,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run_log(&self) -> &RunLog {
        &self.run_log
    }

    /// 列出来源文件的工作表名称
    pub fn list_sheets(&self, input: &Path) -> AppResult<Vec<String>> {
        Ok(self.loader.load(input)?.sheet_names())
    }

    /// 执行一次处理并记录运行日志
    #[instrument(skip(self, request), fields(input = %request.input.display()))]
    pub fn run(&self, request: &RunRequest) -> AppResult<RunOutcome> {
        let run_id = Uuid::new_v4().to_string();
        let file = display_name(&request.input);

        let result = self.execute(&run_id, request);

        let entry = match &result {
            Ok(outcome) => {
                info!(
                    run_id = %outcome.run_id,
                    rows = outcome.rows,
                    result_sheet = %outcome.result_sheet,
                    summary = %outcome.summary,
                    "处理完成"
                );
                RunLogEntry::now(
                    &file,
                    RunStatus::Success,
                    format!(
                        "處理 {} 筆資料，新增工作表 {}",
                        outcome.rows, outcome.result_sheet
                    ),
                )
            }
            Err(err) => {
                error!(run_id = %run_id, error = %err, "处理失败");
                RunLogEntry::now(&file, err.run_status(), err.to_string())
            }
        };

        // 日志写入失败不影响处理结果
        if let Err(e) = self.run_log.append(&entry) {
            warn!(error = %e, "运行日志写入失败");
        }

        result
    }

    fn execute(&self, run_id: &str, request: &RunRequest) -> AppResult<RunOutcome> {
        // ===== 1. 读取活頁簿 =====
        let workbook = self.loader.load(&request.input)?;

        // ===== 2. 选择工作表 + 读取资料表 =====
        let grid = match &request.sheet {
            Some(name) => workbook.sheet(name)?,
            None => workbook.first_sheet()?,
        };
        let source_sheet = grid.name().to_string();
        let table = read_table(grid, self.config.header_row)?;
        info!(
            run_id,
            sheet = %source_sheet,
            rows = table.len(),
            columns = table.columns().len(),
            "资料表已读取"
        );

        // ===== 3. 管线处理 =====
        let output = PipelineOrchestrator::new(&self.config).process(table)?;

        // ===== 4. 写出活頁簿 =====
        let result_sheet = result_sheet_name(&workbook, &source_sheet, &self.config);
        let output_path = request
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&request.input, &workbook));

        let sheet = ResultSheet {
            name: &result_sheet,
            table: &output.table,
            percent_column: &self.config.derived_columns.yield_ratio,
        };
        WorkbookWriter::new(&self.config.yield_number_format).write_to_path(
            &workbook,
            &sheet,
            &output_path,
        )?;

        Ok(RunOutcome {
            run_id: run_id.to_string(),
            output_path,
            source_sheet,
            result_sheet,
            rows: output.table.len(),
            summary: output.summary,
        })
    }
}

fn result_sheet_name(workbook: &SourceWorkbook, source_sheet: &str, config: &PipelineConfig) -> String {
    let existing: Vec<String> = workbook
        .sheet_names()
        .iter()
        .map(|name| sanitize_sheet_name(name))
        .collect();
    resolve_result_sheet_name(
        &existing,
        &sanitize_sheet_name(source_sheet),
        &config.result_sheet_suffix,
    )
}

fn default_output_path(input: &Path, workbook: &SourceWorkbook) -> PathBuf {
    let file_name = output_file_name(&workbook.file_name);
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 以默认配置与默认日志位置执行一次处理
pub fn run(request: &RunRequest) -> AppResult<RunOutcome> {
    Runner::new(PipelineConfig::default(), RunLog::new(RunLog::default_path())).run(request)
}
