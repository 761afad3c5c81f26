// ==========================================
// 出货数据对账系统 - 对账编排器
// ==========================================
// 流程: 列映射 → 主数据索引 → 物料匹配 → 派生指标 → 固定版式表
// 红线: 列映射失败时不产生任何输出表
// 红线: 运行参数在构造时固定，运行期间不再读取配置
// ==========================================

use crate::config::RunSettings;
use crate::domain::run::{RunMode, RunReport};
use crate::domain::table::RawTable;
use crate::domain::types::SourceKind;
use crate::engine::item_matcher::MasterIndex;
use crate::engine::table_builder::TableBuilder;
use crate::importer::column_resolver::{ColumnMapping, ColumnResolver};
use crate::importer::error::ImportResult;
use crate::importer::header_matcher::FuzzyHeaderMatcher;
use crate::perf::PerfGuard;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

// ==========================================
// ReconEngine - 对账编排器
// ==========================================
pub struct ReconEngine {
    settings: RunSettings,
    matcher: FuzzyHeaderMatcher,
}

impl ReconEngine {
    /// 创建编排器
    ///
    /// # 参数
    /// - settings: 本次运行的参数快照
    pub fn new(settings: RunSettings) -> Self {
        let matcher = FuzzyHeaderMatcher::new(settings.header_similarity_cutoff);
        Self { settings, matcher }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// 解析源表列映射（必填列缺失即失败）
    pub fn resolve_columns(&self, table: &RawTable, kind: SourceKind) -> ImportResult<ColumnMapping> {
        ColumnResolver::new(&self.matcher).resolve_all(table, kind)
    }

    /// 投影模式：仅 master
    pub fn run_projection(&self, master: &RawTable) -> ImportResult<RunReport> {
        let mut perf = PerfGuard::new("run_projection");
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();

        info!(run_id = %run_id, master_rows = master.len(), "开始投影运行");

        let mapping = self.resolve_columns(master, SourceKind::Master)?;
        let table = TableBuilder::new(&self.settings).build_projection(master, &mapping);

        perf.set_rows(master.len());
        Ok(RunReport {
            run_id,
            mode: RunMode::Projection,
            master_rows: master.len(),
            feed_rows: None,
            summary: None,
            started_at,
            table,
        })
    }

    /// 关联模式：master + feed
    ///
    /// 两张表的列映射都先于任何行处理完成
    pub fn run_joined(&self, master: &RawTable, feed: &RawTable) -> ImportResult<RunReport> {
        let mut perf = PerfGuard::new("run_joined");
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();

        info!(
            run_id = %run_id,
            master_rows = master.len(),
            feed_rows = feed.len(),
            "开始关联运行"
        );

        let master_mapping = self.resolve_columns(master, SourceKind::Master)?;
        let feed_mapping = self.resolve_columns(feed, SourceKind::Feed)?;

        let index = MasterIndex::build(master, &master_mapping);
        let (table, summary) =
            TableBuilder::new(&self.settings).build_joined(feed, &feed_mapping, &index);

        perf.set_rows(feed.len());
        Ok(RunReport {
            run_id,
            mode: RunMode::Joined,
            master_rows: master.len(),
            feed_rows: Some(feed.len()),
            summary: Some(summary),
            started_at,
            table,
        })
    }
}
