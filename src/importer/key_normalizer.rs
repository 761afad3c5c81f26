// ==========================================
// 出货数据对账系统 - 物料键归一化
// ==========================================
// 规则: TRIM → UPPER → 去除 '-' '.' '_' 与空白
// 红线: 幂等，且是 master / feed 之间唯一的关联键
// ==========================================

/// 归一化物料键（缺失值 → 空串）
pub fn normalize_item_key(value: Option<&str>) -> String {
    match value {
        None => String::new(),
        Some(raw) => raw
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '.' | '_') && !c.is_whitespace())
            .collect(),
    }
}
