// ==========================================
// 出货数据对账系统 - 运行结果
// ==========================================
// 用途: 单次对账运行的元信息与匹配统计
// ==========================================

use crate::domain::output::OutputTable;
use crate::domain::types::MatchType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RunMode - 运行模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunMode {
    Projection, // 仅 master：尺寸投影
    Joined,     // master + feed：关联计算
}

// ==========================================
// MatchSummary - 匹配统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub exact: usize,
    pub partial: usize,
    pub unmatched: usize,
}

impl MatchSummary {
    pub fn record(&mut self, match_type: MatchType) {
        match match_type {
            MatchType::Exact => self.exact += 1,
            MatchType::Partial => self.partial += 1,
            MatchType::None => self.unmatched += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.exact + self.partial + self.unmatched
    }
}

// ==========================================
// RunReport - 运行报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,                 // 运行 ID（UUID）
    pub mode: RunMode,                  // 运行模式
    pub master_rows: usize,             // master 数据行数
    pub feed_rows: Option<usize>,       // feed 数据行数（投影模式为 None）
    pub summary: Option<MatchSummary>,  // 匹配统计（投影模式为 None）
    pub started_at: DateTime<Utc>,      // 开始时间
    pub table: OutputTable,             // 输出表
}
