// ==========================================
// 出货数据对账系统 - 对账配置读取 Trait
// ==========================================
// 职责: 定义对账运行所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::CubeFormula;
use std::error::Error;

// ==========================================
// ReconConfigReader Trait
// ==========================================
// 用途: 对账运行所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ReconConfigReader: Send + Sync {
    // ===== 出货单常量 =====

    /// 获取默认 UOM（每箱件数）
    ///
    /// # 默认值
    /// - 10
    ///
    /// # 用途
    /// - 投影模式 UOM 列
    /// - master 无 Quantity Per Unit 列或该值不可用时的箱数除数
    fn get_default_uom(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取客户名（Customer 列常量）
    ///
    /// # 默认值
    /// - SENSUAL
    fn get_customer_name(&self) -> Result<String, Box<dyn Error>>;

    // ===== 重量/立方常量 =====

    /// 获取单箱包装附加重量（磅）
    ///
    /// # 默认值
    /// - 2.0
    fn get_carton_weight_add_lbs(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取 cube in cft 附加立方
    ///
    /// # 默认值
    /// - 0.3
    fn get_cube_offset_cft(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取 cube in cft 计算口径
    ///
    /// # 默认值
    /// - MASTER_CUBE
    fn get_cube_formula(&self) -> Result<CubeFormula, Box<dyn Error>>;

    // ===== 托盘常量 =====

    /// 获取单托盘容量（立方英尺）
    ///
    /// # 默认值
    /// - 65.0（必须 > 0）
    fn get_pallet_capacity_cft(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取每托盘折算 FINAL CUBE
    ///
    /// # 默认值
    /// - 130
    fn get_final_cube_per_pallet(&self) -> Result<i64, Box<dyn Error>>;

    /// 获取托盘自重（磅）
    ///
    /// # 默认值
    /// - 40.0
    fn get_pallet_weight_lbs(&self) -> Result<f64, Box<dyn Error>>;

    // ===== 匹配与输出 =====

    /// 获取表头模糊匹配阈值
    ///
    /// # 默认值
    /// - 0.6（取值范围 (0, 1]）
    fn get_header_similarity_cutoff(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取输出文件名
    ///
    /// # 默认值
    /// - combined_data.csv
    fn get_output_file_name(&self) -> Result<String, Box<dyn Error>>;
}
