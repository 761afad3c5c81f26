// ==========================================
// 出货数据对账系统 - 主数据物料记录
// ==========================================
// 用途: 由 master 表单行派生，按归一化物料键索引
// 说明: 全部保留原始文本，数值解析推迟到指标计算
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_id: String,                   // 原始 Item #
    pub weight: String,                    // weight w/out add
    pub cube: String,                      // cube in cm
    pub length: String,
    pub width: String,
    pub height: String,
    pub quantity_per_unit: Option<String>, // UOM（列缺失时为 None）
}
