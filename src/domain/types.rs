// ==========================================
// 製造命令前處理 - 领域类型定义
// ==========================================
// 职责: 系列项目 / 项目分类 / 季度 等封闭枚举
// 红线: 分类结果必须是双字段结构体，不得以元组临时拆列
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 系列项目 (Category Main)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryMain {
    NucleicAcidExtraction, // 核酸萃取
    FormulatedReagent,     // 配方試劑
    Ivd,                   // IVD
    NonReagent,            // 非試劑類
}

impl CategoryMain {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryMain::NucleicAcidExtraction => "核酸萃取",
            CategoryMain::FormulatedReagent => "配方試劑",
            CategoryMain::Ivd => "IVD",
            CategoryMain::NonReagent => "非試劑類",
        }
    }
}

impl fmt::Display for CategoryMain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 项目分类 (Category Sub)
// ==========================================
// 依附于系列项目；核酸萃取 → A/B，配方試劑 → C/D/E/F
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategorySub {
    PockitCentralRelated, // A: POCKIT Central (相關)
    Extraction,           // B: 核酸萃取
    IqPlusPockit,         // C: IQ Plus、POCKIT
    PockitCentral,        // D: POCKIT Central
    Iq2000,               // E: IQ 2000
    IqReal,               // F: IQ real
}

impl CategorySub {
    pub fn label(&self) -> &'static str {
        match self {
            CategorySub::PockitCentralRelated => "POCKIT Central (相關)",
            CategorySub::Extraction => "核酸萃取",
            CategorySub::IqPlusPockit => "IQ Plus、POCKIT",
            CategorySub::PockitCentral => "POCKIT Central",
            CategorySub::Iq2000 => "IQ 2000",
            CategorySub::IqReal => "IQ real",
        }
    }
}

impl fmt::Display for CategorySub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// Classification - 两级分类结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub main: CategoryMain,
    pub sub: Option<CategorySub>,
}

impl Classification {
    pub fn new(main: CategoryMain, sub: Option<CategorySub>) -> Self {
        Self { main, sub }
    }

    pub fn non_reagent() -> Self {
        Self::new(CategoryMain::NonReagent, None)
    }

    /// 项目分类的输出文字（无次分类时为空字符串）
    pub fn sub_label(&self) -> &'static str {
        self.sub.map(|s| s.label()).unwrap_or("")
    }
}

// ==========================================
// 季度 (Quarter)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// 月份 → 季度；月份不在 1..=12 时返回 None
    pub fn from_month(month: i64) -> Option<Self> {
        match month {
            1..=3 => Some(Quarter::Q1),
            4..=6 => Some(Quarter::Q2),
            7..=9 => Some(Quarter::Q3),
            10..=12 => Some(Quarter::Q4),
            _ => None,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quarter::Q1 => write!(f, "Q1"),
            Quarter::Q2 => write!(f, "Q2"),
            Quarter::Q3 => write!(f, "Q3"),
            Quarter::Q4 => write!(f, "Q4"),
        }
    }
}

// ==========================================
// 运行状态 (Run Status) - 运行日志用
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Success, // 处理完成
    Failed,  // 欄位校验失败
    Error,   // 其他错误（文件/解析/写出）
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => write!(f, "SUCCESS"),
            RunStatus::Failed => write!(f, "FAILED"),
            RunStatus::Error => write!(f, "ERROR"),
        }
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SUCCESS" => Ok(RunStatus::Success),
            "FAILED" => Ok(RunStatus::Failed),
            "ERROR" => Ok(RunStatus::Error),
            other => Err(format!("未知运行状态: {}", other)),
        }
    }
}
