// ==========================================
// 出货数据对账系统 - 配置层
// ==========================================
// 职责: 对账常量/口径配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod recon_config_trait;
pub mod run_settings;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use recon_config_trait::ReconConfigReader;
pub use run_settings::RunSettings;
