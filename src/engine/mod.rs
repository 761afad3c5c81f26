// ==========================================
// 出货数据对账系统 - 引擎层
// ==========================================
// 职责: 物料匹配、派生指标、收货方分类、固定版式表构建
// 红线: Engine 不做文件读写，只处理内存中的原始表
// ==========================================

pub mod item_matcher;
pub mod metrics;
pub mod orchestrator;
pub mod ship_to;
pub mod table_builder;

// 重导出核心引擎
pub use item_matcher::MasterIndex;
pub use metrics::{safe_float, MetricsCalculator, ShipmentMetrics};
pub use orchestrator::ReconEngine;
pub use ship_to::classify_ship_to;
pub use table_builder::TableBuilder;
