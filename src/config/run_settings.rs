// ==========================================
// 出货数据对账系统 - 运行参数快照
// ==========================================
// 红线: 单次运行开始时一次性读取，运行期间不再访问配置库
// ==========================================

use crate::config::recon_config_trait::ReconConfigReader;
use crate::domain::types::CubeFormula;
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub default_uom: f64,
    pub customer_name: String,
    pub carton_weight_add_lbs: f64,
    pub cube_offset_cft: f64,
    pub cube_formula: CubeFormula,
    pub pallet_capacity_cft: f64,
    pub final_cube_per_pallet: i64,
    pub pallet_weight_lbs: f64,
    pub header_similarity_cutoff: f64,
    pub output_file_name: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            default_uom: 10.0,
            customer_name: "SENSUAL".to_string(),
            carton_weight_add_lbs: 2.0,
            cube_offset_cft: 0.3,
            cube_formula: CubeFormula::MasterCube,
            pallet_capacity_cft: 65.0,
            final_cube_per_pallet: 130,
            pallet_weight_lbs: 40.0,
            header_similarity_cutoff: 0.6,
            output_file_name: "combined_data.csv".to_string(),
        }
    }
}

impl RunSettings {
    /// 从配置读取器加载全部运行参数
    pub fn load(config: &dyn ReconConfigReader) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            default_uom: config.get_default_uom()?,
            customer_name: config.get_customer_name()?,
            carton_weight_add_lbs: config.get_carton_weight_add_lbs()?,
            cube_offset_cft: config.get_cube_offset_cft()?,
            cube_formula: config.get_cube_formula()?,
            pallet_capacity_cft: config.get_pallet_capacity_cft()?,
            final_cube_per_pallet: config.get_final_cube_per_pallet()?,
            pallet_weight_lbs: config.get_pallet_weight_lbs()?,
            header_similarity_cutoff: config.get_header_similarity_cutoff()?,
            output_file_name: config.get_output_file_name()?,
        })
    }

    /// UOM 列的文本形式（10.0 → "10"）
    pub fn default_uom_text(&self) -> String {
        format!("{}", self.default_uom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;

    #[test]
    fn test_load_matches_default() {
        let config = ConfigManager::in_memory().unwrap();
        let settings = RunSettings::load(&config).unwrap();

        assert_eq!(settings, RunSettings::default());
        assert_eq!(settings.default_uom_text(), "10");
    }
}
