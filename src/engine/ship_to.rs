// ==========================================
// 出货数据对账系统 - 收货方分类
// ==========================================
// 输入: Ship To Address 1（TRIM + 大写后按顺序匹配）
// 红线: 规则顺序即优先级，第一个命中即返回
// 兜底: 地址首个空白分隔词；空地址返回空串
// ==========================================

// ==========================================
// ShipToRule - 单条分类规则
// ==========================================
struct ShipToRule {
    name: &'static str,
    matches: fn(&str) -> bool,
}

fn contains_any(address: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| address.contains(n))
}

/// DD's 门店：DDS 或独立词 DD
fn is_dds(address: &str) -> bool {
    address.contains("DDS")
        || address.contains(" DD ")
        || address.starts_with("DD ")
        || address.ends_with(" DD")
        || address == "DD"
}

const RULES: &[ShipToRule] = &[
    ShipToRule {
        name: "BURLINGTON",
        matches: |a: &str| a.contains("BURLINGTON"),
    },
    ShipToRule {
        name: "SAN BERNARDINO",
        matches: |a: &str| a.contains("SAN BERNARDINO"),
    },
    ShipToRule {
        name: "MARSHALLS",
        matches: |a: &str| a.contains("MARSHALLS"),
    },
    ShipToRule {
        name: "T.J. MAXX",
        matches: |a: &str| contains_any(a, &["TJMAXX", "TJ MAXX", "T.J. MAXX"]),
    },
    ShipToRule {
        name: "DDs",
        matches: is_dds,
    },
    ShipToRule {
        name: "BEALLS",
        matches: |a: &str| a.contains("BEALLS"),
    },
    ShipToRule {
        name: "ROSS",
        matches: |a: &str| a.contains("ROSS"),
    },
    ShipToRule {
        name: "FASHION NOVA",
        matches: |a: &str| contains_any(a, &["FASHION NOVA", "FASHIONNOVA"]),
    },
];

/// 由收货地址推导 Ship to Name
pub fn classify_ship_to(address: Option<&str>) -> String {
    let address = address.unwrap_or("").trim().to_uppercase();
    if address.is_empty() {
        return String::new();
    }

    RULES
        .iter()
        .find(|rule| (rule.matches)(&address))
        .map(|rule| rule.name.to_string())
        .unwrap_or_else(|| {
            address
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_string()
        })
}
