// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use shipment_recon::config::ReconConfigReader;
use shipment_recon::domain::types::CubeFormula;
use std::error::Error;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
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

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
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

    /// 历史立方口径
    pub fn carton_weight_formula() -> Self {
        let mut config = Self::default();
        config.cube_formula = CubeFormula::CartonWeight;
        config
    }

    /// 自定义客户名
    pub fn with_customer(name: &str) -> Self {
        let mut config = Self::default();
        config.customer_name = name.to_string();
        config
    }
}

impl ReconConfigReader for MockConfig {
    fn get_default_uom(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.default_uom)
    }

    fn get_customer_name(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.customer_name.clone())
    }

    fn get_carton_weight_add_lbs(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.carton_weight_add_lbs)
    }

    fn get_cube_offset_cft(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.cube_offset_cft)
    }

    fn get_cube_formula(&self) -> Result<CubeFormula, Box<dyn Error>> {
        Ok(self.cube_formula)
    }

    fn get_pallet_capacity_cft(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.pallet_capacity_cft)
    }

    fn get_final_cube_per_pallet(&self) -> Result<i64, Box<dyn Error>> {
        Ok(self.final_cube_per_pallet)
    }

    fn get_pallet_weight_lbs(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.pallet_weight_lbs)
    }

    fn get_header_similarity_cutoff(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.header_similarity_cutoff)
    }

    fn get_output_file_name(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.output_file_name.clone())
    }
}
