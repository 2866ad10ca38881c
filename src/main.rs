// ==========================================
// 製造命令單頭資料前處理 - 命令行入口
// ==========================================
// 用法: work-order-prep <INPUT> [--sheet 名称] [--output 路径] [--config 配置]
//       [--log 日志] [--header-row 行号] [--list-sheets] [--json]
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use work_order_prep::config::ConfigManager;
use work_order_prep::run_log::RunLog;
use work_order_prep::{logging, RunRequest, Runner, APP_NAME, VERSION};

/// 製造命令單頭資料前處理: 保留原始工作表，新增含分類/季度/產率的處理結果工作表
#[derive(Parser, Debug)]
#[command(name = "work-order-prep", version, about)]
struct Args {
    /// 来源 Excel/CSV 文件
    input: PathBuf,

    /// 要处理的工作表（默认第一个）
    #[arg(long)]
    sheet: Option<String>,

    /// 输出文件（默认: 来源目录下 Processed_{文件名}.xlsx）
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// 管线配置 JSON
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// 运行日志文件（默认: 用户数据目录/work-order-prep/process_log.txt）
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// 标题列行号（1 起算，覆盖配置）
    #[arg(long)]
    header_row: Option<usize>,

    /// 只列出工作表名称
    #[arg(long)]
    list_sheets: bool,

    /// 以 JSON 输出处理结果与日志
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.json);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("發生錯誤：{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    tracing::info!("{} v{}", APP_NAME, VERSION);

    let mut config = ConfigManager::load(args.config.as_deref()).context("配置加载失败")?;
    if let Some(header_row) = args.header_row {
        config.header_row = header_row;
        ConfigManager::validate(&config).context("标题列行号无效")?;
    }

    let log_path = args.log.unwrap_or_else(RunLog::default_path);
    let runner = Runner::new(config, RunLog::new(log_path));

    if args.list_sheets {
        for name in runner.list_sheets(&args.input)? {
            println!("{}", name);
        }
        return Ok(());
    }

    tracing::info!(
        header_row = runner.config().header_row,
        log = %runner.run_log().path().display(),
        "开始处理"
    );

    let mut request = RunRequest::new(&args.input);
    if let Some(sheet) = args.sheet {
        request = request.with_sheet(sheet);
    }
    if let Some(output) = args.output {
        request = request.with_output(output);
    }

    let outcome = runner.run(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("✅ 處理完成！已新增工作表：{}", outcome.result_sheet);
        println!("📊 年度統計：{}", outcome.summary);
        println!("📥 輸出檔案：{}", outcome.output_path.display());
    }
    Ok(())
}
