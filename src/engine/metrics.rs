// ==========================================
// 出货数据对账系统 - 派生指标计算
// ==========================================
// 链路: 箱数 → 取整箱数 → 单箱重量 → 尺寸 → 立方 → 托盘 → 总重
// 红线: 计算全程保留完整精度，仅在写入输出行时格式化
// 红线: 数值解析永不失败（safe_float 回退默认值）
// ==========================================

use crate::config::RunSettings;
use crate::domain::item::ItemRecord;
use crate::domain::output::OutputRow;
use crate::domain::types::CubeFormula;

/// 立方英寸 → 立方英尺
pub const CUBIC_INCHES_PER_CUBIC_FOOT: f64 = 1728.0;

/// 文本 → f64（去千分位逗号与空格；空/非法/非有限值返回默认值）
pub fn safe_float(value: &str, default: f64) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return default;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => default,
    }
}

/// 两位小数
pub fn format_2dp(value: f64) -> String {
    format!("{:.2}", value)
}

/// 整数列（值已取整，按 f64 输出全部整数位，不做 i64 截断）
pub fn format_whole(value: f64) -> String {
    // -0.0 与 0.0 统一输出 "0"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.0}", value)
}

// ==========================================
// ShipmentMetrics - 单行派生指标（完整精度）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipmentMetrics {
    pub cartons: f64,
    pub cartons_rounded: f64,
    pub individual_carton_weight: f64,
    pub dimension: f64,
    pub cube_in_cft: f64,
    pub total_cubes: f64,
    pub pallets: f64,
    pub final_cube: f64,
    pub total_weight: f64,
}

impl ShipmentMetrics {
    /// 写入输出行的派生列
    pub fn apply_to(&self, row: &mut OutputRow) {
        row.cartons = format_2dp(self.cartons);
        row.cartons_rounded = format_whole(self.cartons_rounded);
        row.individual_carton_weight = format_2dp(self.individual_carton_weight);
        row.dimension = format_2dp(self.dimension);
        row.cube_in_cft = format_2dp(self.cube_in_cft);
        row.total_cubes = format_2dp(self.total_cubes);
        row.pallet = format_whole(self.pallets);
        row.final_cube = format_whole(self.final_cube);
        row.total_weight = format_2dp(self.total_weight);
    }
}

// ==========================================
// MetricsCalculator
// ==========================================
pub struct MetricsCalculator<'s> {
    settings: &'s RunSettings,
}

impl<'s> MetricsCalculator<'s> {
    pub fn new(settings: &'s RunSettings) -> Self {
        Self { settings }
    }

    /// 物料的每箱件数
    ///
    /// 主数据无 Quantity Per Unit 列时取默认 UOM；有该列时按单元格解析，
    /// 空/非法值为 0（此时箱数为 0）
    pub fn quantity_per_unit(&self, item: &ItemRecord) -> f64 {
        match item.quantity_per_unit.as_deref() {
            Some(q) => safe_float(q, 0.0),
            None => self.settings.default_uom,
        }
    }

    /// UOM 输出单元格：主数据原值，无该列时为默认 UOM
    pub fn uom_text(&self, item: &ItemRecord) -> String {
        match item.quantity_per_unit.as_deref() {
            Some(q) => q.trim().to_string(),
            None => self.settings.default_uom_text(),
        }
    }

    /// 计算派生指标
    ///
    /// # 参数
    /// - total_pieces: 出货件数（feed Qty 原始文本）
    /// - item: 匹配到的主数据记录
    pub fn compute(&self, total_pieces: &str, item: &ItemRecord) -> ShipmentMetrics {
        let s = self.settings;

        let pieces = safe_float(total_pieces, 0.0);
        let qpu = self.quantity_per_unit(item);
        let weight = safe_float(&item.weight, 0.0);
        let cube = safe_float(&item.cube, 0.0);
        let length = safe_float(&item.length, 0.0);
        let width = safe_float(&item.width, 0.0);
        let height = safe_float(&item.height, 0.0);

        let cartons = if qpu > 0.0 { pieces / qpu } else { 0.0 };
        let cartons_rounded = cartons.ceil();
        let individual_carton_weight = weight + s.carton_weight_add_lbs;

        let dimension = if length > 0.0 && width > 0.0 && height > 0.0 {
            length * width * height / CUBIC_INCHES_PER_CUBIC_FOOT
        } else {
            0.0
        };

        let (cube_in_cft, total_cubes) = match s.cube_formula {
            CubeFormula::MasterCube => {
                let cft = cube / CUBIC_INCHES_PER_CUBIC_FOOT + s.cube_offset_cft;
                (cft, cft * cartons_rounded)
            }
            CubeFormula::CartonWeight => {
                let cft = individual_carton_weight / CUBIC_INCHES_PER_CUBIC_FOOT + s.cube_offset_cft;
                (cft, dimension * cartons)
            }
        };

        let pallets = if total_cubes > 0.0 {
            (total_cubes / s.pallet_capacity_cft).ceil()
        } else {
            1.0
        };
        let final_cube = pallets * s.final_cube_per_pallet as f64;

        let total_weight = match s.cube_formula {
            CubeFormula::MasterCube => {
                cartons_rounded * individual_carton_weight + pallets * s.pallet_weight_lbs
            }
            CubeFormula::CartonWeight => {
                individual_carton_weight * cartons_rounded + s.pallet_weight_lbs
            }
        };

        ShipmentMetrics {
            cartons,
            cartons_rounded,
            individual_carton_weight,
            dimension,
            cube_in_cft,
            total_cubes,
            pallets,
            final_cube,
            total_weight,
        }
    }
}
