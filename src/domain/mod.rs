// ==========================================
// 出货数据对账系统 - 领域模型层
// ==========================================
// 职责: 定义原始表、主数据记录、输出版式、运行结果
// 红线: 不含文件读写逻辑,不含匹配/计算逻辑
// ==========================================

pub mod item;
pub mod output;
pub mod run;
pub mod table;
pub mod types;

// 重导出核心类型
pub use item::ItemRecord;
pub use output::{OutputColumn, OutputRow, OutputTable, OUTPUT_COLUMN_COUNT};
pub use run::{MatchSummary, RunMode, RunReport};
pub use table::RawTable;
pub use types::{CanonicalColumn, CubeFormula, MatchType, SourceKind};
