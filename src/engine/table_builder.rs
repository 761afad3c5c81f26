// ==========================================
// 出货数据对账系统 - 固定版式表构建
// ==========================================
// 投影模式: master 每行 → 1 输出行（仅尺寸列）
// 关联模式: feed 每行 → 1 输出行（出货列 + 匹配尺寸 + 派生指标）
// 红线: 输出行数 = 源表行数 + 1（表头），与匹配结果无关
// 红线: 未匹配行照常输出，尺寸与派生列留空
// ==========================================

use crate::config::RunSettings;
use crate::domain::output::{OutputRow, OutputTable};
use crate::domain::run::MatchSummary;
use crate::domain::table::RawTable;
use crate::domain::types::{CanonicalColumn, MatchType};
use crate::engine::item_matcher::MasterIndex;
use crate::engine::metrics::MetricsCalculator;
use crate::engine::ship_to::classify_ship_to;
use crate::importer::column_resolver::ColumnMapping;
use tracing::{debug, info};

/// 未匹配物料最多逐条记录的日志数
const UNMATCHED_LOG_LIMIT: usize = 10;

pub struct TableBuilder<'s> {
    settings: &'s RunSettings,
}

impl<'s> TableBuilder<'s> {
    pub fn new(settings: &'s RunSettings) -> Self {
        Self { settings }
    }

    /// 投影模式（仅 master）
    pub fn build_projection(&self, master: &RawTable, mapping: &ColumnMapping) -> OutputTable {
        let uom = self.settings.default_uom_text();

        let rows: Vec<OutputRow> = (0..master.len())
            .map(|row| OutputRow {
                uom: uom.clone(),
                weight_without_add: mapping.text(master, row, CanonicalColumn::Weight),
                cube_in_cm: mapping.text(master, row, CanonicalColumn::Cube),
                length: mapping.text(master, row, CanonicalColumn::Length),
                width: mapping.text(master, row, CanonicalColumn::Width),
                height: mapping.text(master, row, CanonicalColumn::Height),
                ..Default::default()
            })
            .collect();

        info!(rows = rows.len(), "投影表构建完成");

        OutputTable {
            header_columns: OutputTable::projection_header(),
            rows,
        }
    }

    /// 关联模式（master 索引 + feed）
    ///
    /// # 返回
    /// - 输出表
    /// - 匹配统计（精确/模糊/未匹配）
    pub fn build_joined(
        &self,
        feed: &RawTable,
        mapping: &ColumnMapping,
        index: &MasterIndex,
    ) -> (OutputTable, MatchSummary) {
        let calc = MetricsCalculator::new(self.settings);
        let default_uom = self.settings.default_uom_text();
        let mut summary = MatchSummary::default();
        let mut rows = Vec::with_capacity(feed.len());

        for i in 0..feed.len() {
            let raw_item = mapping.value(feed, i, CanonicalColumn::Item);
            let total_pieces = mapping.text(feed, i, CanonicalColumn::Qty);

            let mut row = OutputRow {
                customer: self.settings.customer_name.clone(),
                ship_to_name: classify_ship_to(mapping.value(feed, i, CanonicalColumn::ShipToAddress)),
                start_date: mapping.text(feed, i, CanonicalColumn::ShipDate),
                cancel_date: mapping.text(feed, i, CanonicalColumn::CancelDate),
                po_number: mapping.text(feed, i, CanonicalColumn::PoNumber),
                item_style: raw_item.unwrap_or("").to_string(),
                invoice_number: mapping.text(feed, i, CanonicalColumn::InvoiceNumber),
                total_pieces: total_pieces.clone(),
                uom: default_uom.clone(),
                ..Default::default()
            };

            let (matched, match_type) = index.match_item(raw_item);
            summary.record(match_type);

            match matched {
                Some(item) => {
                    row.uom = calc.uom_text(item);
                    row.weight_without_add = item.weight.clone();
                    row.cube_in_cm = item.cube.clone();
                    row.length = item.length.clone();
                    row.width = item.width.clone();
                    row.height = item.height.clone();
                    calc.compute(&total_pieces, item).apply_to(&mut row);

                    if match_type == MatchType::Partial {
                        debug!(row = i, item = %row.item_style, master_item = %item.item_id, "模糊匹配");
                    }
                }
                None => {
                    if summary.unmatched <= UNMATCHED_LOG_LIMIT {
                        debug!(row = i, item = %row.item_style, "物料未匹配");
                    }
                }
            }

            rows.push(row);
        }

        info!(
            rows = rows.len(),
            exact = summary.exact,
            partial = summary.partial,
            unmatched = summary.unmatched,
            "关联表构建完成"
        );

        (
            OutputTable {
                header_columns: OutputTable::joined_header(),
                rows,
            },
            summary,
        )
    }
}
