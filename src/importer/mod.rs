// ==========================================
// 出货数据对账系统 - 导入层
// ==========================================
// 职责: 外部文件 → 原始表 → 标准列映射
// 支持: CSV, Excel, ODS
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod error;
pub mod file_parser;
pub mod header_matcher;
pub mod importer_trait;
pub mod key_normalizer;

// 重导出核心类型
pub use column_resolver::{ColumnMapping, ColumnResolver};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use header_matcher::{normalize_header, FuzzyHeaderMatcher, DEFAULT_SIMILARITY_CUTOFF};
pub use key_normalizer::normalize_item_key;

// 重导出 Trait 接口
pub use importer_trait::{FileParser, HeaderMatcher};
