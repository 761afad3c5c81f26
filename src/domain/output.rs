// ==========================================
// 出货数据对账系统 - 固定版式输出表
// ==========================================
// 红线: 输出固定 35 列，第 0-9 列永久留空（兼容历史表格版式）
// 红线: 第 0 行永远是表头，不是数据
// 说明: 业务逻辑只读写具名字段，列位置只在序列化时出现
// ==========================================

use serde::{Deserialize, Serialize};

/// 输出列总数（A..AI）
pub const OUTPUT_COLUMN_COUNT: usize = 35;

// ==========================================
// OutputColumn - 输出列（具名 → 列位置）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputColumn {
    OrderDate,              // K
    Customer,               // L
    ShipToName,             // M
    StartDate,              // N
    CancelDate,             // O
    PoNumber,               // P
    ItemStyle,              // Q
    InvoiceNumber,          // R
    Size,                   // S
    TotalPieces,            // T
    Uom,                    // U
    Cartons,                // V
    CartonsRounded,         // W
    WeightWithoutAdd,       // X
    IndividualCartonWeight, // Y
    CubeInCm,               // Z
    Length,                 // AA
    Width,                  // AB
    Height,                 // AC
    Dimension,              // AD
    CubeInCft,              // AE
    TotalCubes,             // AF
    Pallet,                 // AG
    FinalCube,              // AH
    TotalWeight,            // AI
}

impl OutputColumn {
    /// 全部输出列（按列位置升序）
    pub const ALL: [OutputColumn; 25] = [
        OutputColumn::OrderDate,
        OutputColumn::Customer,
        OutputColumn::ShipToName,
        OutputColumn::StartDate,
        OutputColumn::CancelDate,
        OutputColumn::PoNumber,
        OutputColumn::ItemStyle,
        OutputColumn::InvoiceNumber,
        OutputColumn::Size,
        OutputColumn::TotalPieces,
        OutputColumn::Uom,
        OutputColumn::Cartons,
        OutputColumn::CartonsRounded,
        OutputColumn::WeightWithoutAdd,
        OutputColumn::IndividualCartonWeight,
        OutputColumn::CubeInCm,
        OutputColumn::Length,
        OutputColumn::Width,
        OutputColumn::Height,
        OutputColumn::Dimension,
        OutputColumn::CubeInCft,
        OutputColumn::TotalCubes,
        OutputColumn::Pallet,
        OutputColumn::FinalCube,
        OutputColumn::TotalWeight,
    ];

    /// 列位置（0 起）
    pub fn index(&self) -> usize {
        match self {
            OutputColumn::OrderDate => 10,
            OutputColumn::Customer => 11,
            OutputColumn::ShipToName => 12,
            OutputColumn::StartDate => 13,
            OutputColumn::CancelDate => 14,
            OutputColumn::PoNumber => 15,
            OutputColumn::ItemStyle => 16,
            OutputColumn::InvoiceNumber => 17,
            OutputColumn::Size => 18,
            OutputColumn::TotalPieces => 19,
            OutputColumn::Uom => 20,
            OutputColumn::Cartons => 21,
            OutputColumn::CartonsRounded => 22,
            OutputColumn::WeightWithoutAdd => 23,
            OutputColumn::IndividualCartonWeight => 24,
            OutputColumn::CubeInCm => 25,
            OutputColumn::Length => 26,
            OutputColumn::Width => 27,
            OutputColumn::Height => 28,
            OutputColumn::Dimension => 29,
            OutputColumn::CubeInCft => 30,
            OutputColumn::TotalCubes => 31,
            OutputColumn::Pallet => 32,
            OutputColumn::FinalCube => 33,
            OutputColumn::TotalWeight => 34,
        }
    }

    /// 表头文本（与下游表格模板一致，大小写敏感）
    pub fn header(&self) -> &'static str {
        match self {
            OutputColumn::OrderDate => "Order Date",
            OutputColumn::Customer => "Customer",
            OutputColumn::ShipToName => "Ship to Name",
            OutputColumn::StartDate => "Start Date",
            OutputColumn::CancelDate => "Cancel Date",
            OutputColumn::PoNumber => "PO#",
            OutputColumn::ItemStyle => "Item/Style",
            OutputColumn::InvoiceNumber => "INVOICE #",
            OutputColumn::Size => "Size",
            OutputColumn::TotalPieces => "TOTAL PIECES",
            OutputColumn::Uom => "UOM",
            OutputColumn::Cartons => "Cartons",
            OutputColumn::CartonsRounded => "CARTONS",
            OutputColumn::WeightWithoutAdd => "weight w/out add",
            OutputColumn::IndividualCartonWeight => "individual carton weight (add 2 lbs)",
            OutputColumn::CubeInCm => "cube in cm",
            OutputColumn::Length => "Length",
            OutputColumn::Width => "Width",
            OutputColumn::Height => "Height",
            OutputColumn::Dimension => "dimension",
            OutputColumn::CubeInCft => "cube in cft",
            OutputColumn::TotalCubes => "total cubes",
            OutputColumn::Pallet => "PALLET",
            OutputColumn::FinalCube => "FINAL CUBE",
            OutputColumn::TotalWeight => "TOTAL WEIGHT",
        }
    }
}

// ==========================================
// OutputRow - 输出数据行
// ==========================================
// 空字符串 = 不可计算（区别于计算结果为 0）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    // ===== 出货字段（来自 feed）=====
    pub order_date: String,
    pub customer: String,
    pub ship_to_name: String,
    pub start_date: String,
    pub cancel_date: String,
    pub po_number: String,
    pub item_style: String,
    pub invoice_number: String,
    pub size: String,
    pub total_pieces: String,

    // ===== 尺寸字段（来自 master）=====
    pub uom: String,
    pub weight_without_add: String,
    pub cube_in_cm: String,
    pub length: String,
    pub width: String,
    pub height: String,

    // ===== 派生指标 =====
    pub cartons: String,
    pub cartons_rounded: String,
    pub individual_carton_weight: String,
    pub dimension: String,
    pub cube_in_cft: String,
    pub total_cubes: String,
    pub pallet: String,
    pub final_cube: String,
    pub total_weight: String,
}

impl OutputRow {
    pub fn get(&self, column: OutputColumn) -> &str {
        match column {
            OutputColumn::OrderDate => &self.order_date,
            OutputColumn::Customer => &self.customer,
            OutputColumn::ShipToName => &self.ship_to_name,
            OutputColumn::StartDate => &self.start_date,
            OutputColumn::CancelDate => &self.cancel_date,
            OutputColumn::PoNumber => &self.po_number,
            OutputColumn::ItemStyle => &self.item_style,
            OutputColumn::InvoiceNumber => &self.invoice_number,
            OutputColumn::Size => &self.size,
            OutputColumn::TotalPieces => &self.total_pieces,
            OutputColumn::Uom => &self.uom,
            OutputColumn::Cartons => &self.cartons,
            OutputColumn::CartonsRounded => &self.cartons_rounded,
            OutputColumn::WeightWithoutAdd => &self.weight_without_add,
            OutputColumn::IndividualCartonWeight => &self.individual_carton_weight,
            OutputColumn::CubeInCm => &self.cube_in_cm,
            OutputColumn::Length => &self.length,
            OutputColumn::Width => &self.width,
            OutputColumn::Height => &self.height,
            OutputColumn::Dimension => &self.dimension,
            OutputColumn::CubeInCft => &self.cube_in_cft,
            OutputColumn::TotalCubes => &self.total_cubes,
            OutputColumn::Pallet => &self.pallet,
            OutputColumn::FinalCube => &self.final_cube,
            OutputColumn::TotalWeight => &self.total_weight,
        }
    }

    /// 序列化为 35 个位置单元格
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = vec![String::new(); OUTPUT_COLUMN_COUNT];
        for column in OutputColumn::ALL {
            cells[column.index()] = self.get(column).to_string();
        }
        cells
    }
}

// ==========================================
// OutputTable - 输出表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputTable {
    pub header_columns: Vec<OutputColumn>, // 第 0 行需要写表头的列
    pub rows: Vec<OutputRow>,              // 数据行（不含表头）
}

impl OutputTable {
    /// 投影模式表头: Size(S) .. TOTAL WEIGHT(AI)
    pub fn projection_header() -> Vec<OutputColumn> {
        OutputColumn::ALL
            .iter()
            .copied()
            .filter(|c| c.index() >= OutputColumn::Size.index())
            .collect()
    }

    /// 关联模式表头: Order Date(K) .. TOTAL WEIGHT(AI)
    pub fn joined_header() -> Vec<OutputColumn> {
        OutputColumn::ALL.to_vec()
    }

    pub fn header_cells(&self) -> Vec<String> {
        let mut cells = vec![String::new(); OUTPUT_COLUMN_COUNT];
        for column in &self.header_columns {
            cells[column.index()] = column.header().to_string();
        }
        cells
    }

    /// 完整网格（第 0 行表头 + 数据行）
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.header_cells());
        grid.extend(self.rows.iter().map(|r| r.to_cells()));
        grid
    }

    /// 网格行数（含表头）
    pub fn grid_len(&self) -> usize {
        self.rows.len() + 1
    }
}
