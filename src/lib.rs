// ==========================================
// 出货数据对账系统 - 核心库
// ==========================================
// 输入: UOM 主数据表 + 出货单（940 订单）表
// 输出: 固定 35 列对账表（combined_data.csv）
// 技术栈: Rust + SQLite（配置） + 文件版本存储（主数据）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 原始表 / 输出版式 / 运行结果
pub mod domain;

// 导入层 - 文件解析与表头匹配
pub mod importer;

// 引擎层 - 物料匹配与派生指标
pub mod engine;

// 存储层 - 主数据版本与输出文件
pub mod repository;

// 配置层 - 对账常量
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 对外接口
pub mod api;

// 应用层 - 命令行装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CanonicalColumn, CubeFormula, MatchType, SourceKind};

// 领域实体
pub use domain::{
    ItemRecord, MatchSummary, OutputColumn, OutputRow, OutputTable, RawTable, RunMode, RunReport,
};

// 引擎
pub use engine::{MasterIndex, MetricsCalculator, ReconEngine, TableBuilder};

// API
pub use api::{ApiError, ApiResponse, ReconApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "出货数据对账系统";
