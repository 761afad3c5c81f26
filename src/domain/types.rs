// ==========================================
// 出货数据对账系统 - 领域类型定义
// ==========================================
// 依据: 两类源表的标准列清单 + 匹配类型 + 立方计算口径
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 源表类型 (Source Kind)
// ==========================================
// master: UOM/尺寸主数据; feed: 出货单（940 订单）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    Master,
    Feed,
}

impl SourceKind {
    /// 该源表需要解析的全部标准列（按校验顺序）
    pub fn columns(&self) -> &'static [CanonicalColumn] {
        use CanonicalColumn::*;
        match self {
            SourceKind::Master => &[
                ItemNumber,
                Weight,
                Cube,
                Length,
                Width,
                Height,
                QuantityPerUnit,
            ],
            SourceKind::Feed => &[
                InvoiceNumber,
                ShipDate,
                PoNumber,
                CancelDate,
                Item,
                Qty,
                ShipToAddress,
            ],
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Master => write!(f, "MASTER"),
            SourceKind::Feed => write!(f, "FEED"),
        }
    }
}

// ==========================================
// 标准列 (Canonical Column)
// ==========================================
// 红线: 必填列必须在源表中唯一解析，否则整表失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalColumn {
    // ===== master =====
    ItemNumber,
    Weight,
    Cube,
    Length,
    Width,
    Height,
    QuantityPerUnit,

    // ===== feed =====
    InvoiceNumber,
    ShipDate,
    PoNumber,
    CancelDate,
    Item,
    Qty,
    ShipToAddress,
}

impl CanonicalColumn {
    /// 标准列名（表头匹配的首选目标）
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalColumn::ItemNumber => "Item #",
            CanonicalColumn::Weight => "Weight",
            CanonicalColumn::Cube => "Cube",
            CanonicalColumn::Length => "Length",
            CanonicalColumn::Width => "Width",
            CanonicalColumn::Height => "Height",
            CanonicalColumn::QuantityPerUnit => "Quantity Per Unit",
            CanonicalColumn::InvoiceNumber => "Num",
            CanonicalColumn::ShipDate => "Ship Date",
            CanonicalColumn::PoNumber => "P. O. #",
            CanonicalColumn::CancelDate => "CANCEL DATE",
            CanonicalColumn::Item => "Item",
            CanonicalColumn::Qty => "Qty",
            CanonicalColumn::ShipToAddress => "Ship To Address 1",
        }
    }

    /// 列名别名（只参与精确/归一化匹配，不参与模糊匹配）
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalColumn::QuantityPerUnit => &["UOM", "Qty Per Carton", "Pack Qty"],
            CanonicalColumn::ShipToAddress => &["Ship To Address", "Ship-To Address"],
            _ => &[],
        }
    }

    /// 是否必填
    ///
    /// Quantity Per Unit 缺失时使用配置的默认 UOM
    pub fn is_required(&self) -> bool {
        !matches!(self, CanonicalColumn::QuantityPerUnit)
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 匹配类型 (Match Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Exact,   // 归一化键完全相等
    Partial, // 子串包含
    None,    // 未匹配
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Exact => write!(f, "EXACT"),
            MatchType::Partial => write!(f, "PARTIAL"),
            MatchType::None => write!(f, "NONE"),
        }
    }
}

// ==========================================
// 立方口径 (Cube Formula)
// ==========================================
// MASTER_CUBE: cube_in_cft = 主数据 cube / 1728 + 0.3（当前口径）
// CARTON_WEIGHT: cube_in_cft = 单箱重量 / 1728 + 0.3（历史口径）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CubeFormula {
    MasterCube,
    CartonWeight,
}

impl CubeFormula {
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "MASTER_CUBE" => Some(CubeFormula::MasterCube),
            "CARTON_WEIGHT" => Some(CubeFormula::CartonWeight),
            _ => None,
        }
    }
}

impl fmt::Display for CubeFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubeFormula::MasterCube => write!(f, "MASTER_CUBE"),
            CubeFormula::CartonWeight => write!(f, "CARTON_WEIGHT"),
        }
    }
}
