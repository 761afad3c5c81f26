// ==========================================
// 出货数据对账系统 - 配置管理器
// ==========================================
// 职责: 配置查询、写入、快照
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::recon_config_trait::ReconConfigReader;
use crate::db::{open_in_memory_connection, open_sqlite_connection};
use crate::domain::types::CubeFormula;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 配置数据库文件路径（不存在则创建）
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 使用内存数据库（全部配置取默认值）
    pub fn in_memory() -> Result<Self, Box<dyn Error>> {
        let conn = open_in_memory_connection()?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供管理端复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 读取数值配置；格式错误或不满足约束时告警并回退默认值
    fn get_parsed_or_default<T>(
        &self,
        key: &str,
        default: T,
        valid: impl Fn(T) -> bool,
    ) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Display + Copy,
    {
        let raw = self.get_config_or_default(key, &default.to_string())?;
        match raw.parse::<T>() {
            Ok(v) if valid(v) => Ok(v),
            _ => {
                tracing::warn!(config_key = key, raw_value = %raw, "配置值无效，使用默认值");
                Ok(default)
            }
        }
    }

    fn get_f64_or_default(
        &self,
        key: &str,
        default: f64,
        valid: impl Fn(f64) -> bool,
    ) -> Result<f64, Box<dyn Error>> {
        self.get_parsed_or_default(key, default, |v: f64| v.is_finite() && valid(v))
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 运行报告中记录本次使用的配置
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

// ==========================================
// ReconConfigReader Trait 实现
// ==========================================
impl ReconConfigReader for ConfigManager {
    fn get_default_uom(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::DEFAULT_UOM, 10.0, |v| v > 0.0)
    }

    fn get_customer_name(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::CUSTOMER_NAME, "SENSUAL")
    }

    fn get_carton_weight_add_lbs(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::CARTON_WEIGHT_ADD_LBS, 2.0, |v| v >= 0.0)
    }

    fn get_cube_offset_cft(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::CUBE_OFFSET_CFT, 0.3, |v| v >= 0.0)
    }

    fn get_cube_formula(&self) -> Result<CubeFormula, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::CUBE_FORMULA, "MASTER_CUBE")?;
        Ok(CubeFormula::from_config(&value).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::CUBE_FORMULA,
                raw_value = %value,
                "立方口径配置无效，使用 MASTER_CUBE"
            );
            CubeFormula::MasterCube
        }))
    }

    fn get_pallet_capacity_cft(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::PALLET_CAPACITY_CFT, 65.0, |v| v > 0.0)
    }

    fn get_final_cube_per_pallet(&self) -> Result<i64, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::FINAL_CUBE_PER_PALLET, 130_i64, |v| v > 0)
    }

    fn get_pallet_weight_lbs(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::PALLET_WEIGHT_LBS, 40.0, |v| v >= 0.0)
    }

    fn get_header_similarity_cutoff(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::HEADER_SIMILARITY_CUTOFF, 0.6, |v| {
            v > 0.0 && v <= 1.0
        })
    }

    fn get_output_file_name(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::OUTPUT_FILE_NAME, "combined_data.csv")
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 出货单常量
    pub const DEFAULT_UOM: &str = "default_uom";
    pub const CUSTOMER_NAME: &str = "customer_name";

    // 重量/立方
    pub const CARTON_WEIGHT_ADD_LBS: &str = "carton_weight_add_lbs";
    pub const CUBE_OFFSET_CFT: &str = "cube_offset_cft";
    pub const CUBE_FORMULA: &str = "cube_formula";

    // 托盘
    pub const PALLET_CAPACITY_CFT: &str = "pallet_capacity_cft";
    pub const FINAL_CUBE_PER_PALLET: &str = "final_cube_per_pallet";
    pub const PALLET_WEIGHT_LBS: &str = "pallet_weight_lbs";

    // 匹配与输出
    pub const HEADER_SIMILARITY_CUTOFF: &str = "header_similarity_cutoff";
    pub const OUTPUT_FILE_NAME: &str = "output_file_name";
}
