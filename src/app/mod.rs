// ==========================================
// 出货数据对账系统 - 应用层
// ==========================================
// 职责: 组装配置库、主数据存储与 API（供命令行入口使用）
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_config_db_path, get_default_data_dir, AppState};
