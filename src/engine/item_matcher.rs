// ==========================================
// 出货数据对账系统 - 物料匹配
// ==========================================
// 职责: feed 物料键 → master 物料记录
// 顺序: 精确查找 → 子串包含（按 master 行序，取第一个）
// 红线: 空键不建索引、不参与匹配
// 说明: 子串回退为 O(master) 线性扫描，是已知的规模上限
// ==========================================

use crate::domain::item::ItemRecord;
use crate::domain::table::RawTable;
use crate::domain::types::{CanonicalColumn, MatchType};
use crate::importer::column_resolver::ColumnMapping;
use crate::importer::key_normalizer::normalize_item_key;
use std::collections::HashMap;
use tracing::{debug, info};

// ==========================================
// MasterIndex - 主数据索引
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MasterIndex {
    records: HashMap<String, ItemRecord>, // 归一化键 → 记录（重复键后者覆盖）
    key_order: Vec<String>,               // 归一化键（首次出现的 master 行序）
}

impl MasterIndex {
    /// 由 master 原始表与列映射构建索引（单次运行只构建一次）
    pub fn build(table: &RawTable, mapping: &ColumnMapping) -> Self {
        let mut index = Self::default();
        let has_qpu = mapping.label(CanonicalColumn::QuantityPerUnit).is_some();

        for row in 0..table.len() {
            let item_id = mapping.text(table, row, CanonicalColumn::ItemNumber);
            let record = ItemRecord {
                weight: mapping.text(table, row, CanonicalColumn::Weight),
                cube: mapping.text(table, row, CanonicalColumn::Cube),
                length: mapping.text(table, row, CanonicalColumn::Length),
                width: mapping.text(table, row, CanonicalColumn::Width),
                height: mapping.text(table, row, CanonicalColumn::Height),
                quantity_per_unit: has_qpu
                    .then(|| mapping.text(table, row, CanonicalColumn::QuantityPerUnit)),
                item_id,
            };
            index.insert(record);
        }

        info!(
            master_rows = table.len(),
            indexed_keys = index.len(),
            "主数据索引构建完成"
        );
        index
    }

    /// 插入一条记录（空键忽略）
    pub fn insert(&mut self, record: ItemRecord) {
        let key = normalize_item_key(Some(&record.item_id));
        if key.is_empty() {
            debug!(item_id = %record.item_id, "物料键为空，跳过");
            return;
        }
        if !self.records.contains_key(&key) {
            self.key_order.push(key.clone());
        }
        self.records.insert(key, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 匹配归一化键
    ///
    /// # 返回
    /// - (Some(record), Exact): 键完全相等
    /// - (Some(record), Partial): 任一方包含另一方
    /// - (None, None): 未匹配或键为空
    pub fn match_key(&self, key: &str) -> (Option<&ItemRecord>, MatchType) {
        if key.is_empty() {
            return (None, MatchType::None);
        }

        if let Some(record) = self.records.get(key) {
            return (Some(record), MatchType::Exact);
        }

        let partial = self
            .key_order
            .iter()
            .find(|master_key| master_key.contains(key) || key.contains(master_key.as_str()));

        match partial.and_then(|k| self.records.get(k)) {
            Some(record) => {
                debug!(key, master_key = %record.item_id, "子串匹配");
                (Some(record), MatchType::Partial)
            }
            None => (None, MatchType::None),
        }
    }

    /// 匹配原始物料编号（先归一化）
    pub fn match_item(&self, raw_item: Option<&str>) -> (Option<&ItemRecord>, MatchType) {
        self.match_key(&normalize_item_key(raw_item))
    }
}
