// ==========================================
// 製造命令前處理 - 年度统计
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 年份 → 笔数（键按升序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearSummary {
    counts: BTreeMap<String, usize>,
}

impl YearSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, year: &str) {
        *self.counts.entry(year.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, year: &str) -> Option<usize> {
        self.counts.get(year).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

impl FromIterator<(String, usize)> for YearSummary {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for YearSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(year, count)| format!("{}: {}", year, count))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
