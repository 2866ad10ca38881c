// ==========================================
// 製造命令前處理 - 年度统计
// ==========================================
// 职责: 按年份统计笔数（键按年份升序）
// 说明: 年份取製令單號前 4 码，与季度是否派生成功无关
// ==========================================

use crate::domain::YearSummary;

pub struct YearAggregator;

impl YearAggregator {
    /// 统计年份出现次数；每行都计入（製令單號为空时键为空字符串）
    pub fn aggregate<'a, I>(&self, years: I) -> YearSummary
    where
        I: IntoIterator<Item = &'a str>,
    {
        years.into_iter().fold(YearSummary::new(), |mut summary, year| {
            summary.increment(year);
            summary
        })
    }
}
