// ==========================================
// 出货数据对账系统 - 应用状态
// ==========================================
// 职责: 解析数据目录与配置库路径，创建 ConfigManager + ReconApi
// ==========================================

use crate::api::ReconApi;
use crate::config::{ConfigManager, ReconConfigReader};
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// 配置库文件名（位于数据目录下）
pub const CONFIG_DB_FILE: &str = "shipment_recon.db";

// ==========================================
// AppState
// ==========================================
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: Arc<ConfigManager>,
    pub api: ReconApi,
}

impl AppState {
    /// 创建应用状态
    ///
    /// # 参数
    /// - data_dir: 数据目录（不存在则创建）
    /// - config_db: 配置库路径（None 时使用 <data_dir>/shipment_recon.db）
    pub fn new(data_dir: PathBuf, config_db: Option<PathBuf>) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("无法创建数据目录: {}", data_dir.display()))?;

        let config_db = config_db.unwrap_or_else(|| get_default_config_db_path(&data_dir));
        let config = ConfigManager::new(&config_db.to_string_lossy())
            .map_err(|e| anyhow!("配置库打开失败 ({}): {}", config_db.display(), e))?;
        let config = Arc::new(config);

        let reader: Arc<dyn ReconConfigReader> = config.clone();
        let api = ReconApi::new(&data_dir, reader)?;

        info!(
            data_dir = %data_dir.display(),
            config_db = %config_db.display(),
            "应用状态初始化完成"
        );

        Ok(Self {
            data_dir,
            config,
            api,
        })
    }
}

/// 获取默认数据目录
///
/// # 返回
/// - 环境变量 SHIPMENT_RECON_DATA_DIR（非空时）
/// - 否则: 用户数据目录/shipment-recon（开发构建为 shipment-recon-dev）
/// - 无法获取用户数据目录时: ./shipment-recon-data
pub fn get_default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("SHIPMENT_RECON_DATA_DIR") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    let dir_name = if cfg!(debug_assertions) {
        "shipment-recon-dev"
    } else {
        "shipment-recon"
    };

    dirs::data_dir()
        .map(|d| d.join(dir_name))
        .unwrap_or_else(|| PathBuf::from("./shipment-recon-data"))
}

/// 获取默认配置库路径
pub fn get_default_config_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_DB_FILE)
}
