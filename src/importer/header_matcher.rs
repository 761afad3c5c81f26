// ==========================================
// 出货数据对账系统 - 表头匹配器
// ==========================================
// 职责: 任意拼写/大小写/标点的源表头 → 标准列名
// 匹配顺序:
//   (a) 原样精确匹配
//   (b) 归一化（小写 + 去除非字母数字）后精确匹配
//   (c) 归一化 Levenshtein 相似度，取最高分且 >= 阈值
// ==========================================

use crate::importer::importer_trait::HeaderMatcher;
use std::collections::HashMap;
use tracing::{debug, info};

/// 默认模糊匹配阈值
pub const DEFAULT_SIMILARITY_CUTOFF: f64 = 0.6;

/// 表头归一化：小写，仅保留 [a-z0-9]
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// 两个归一化表头的相似度（0.0 ~ 1.0）
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

// ==========================================
// FuzzyHeaderMatcher - 三级表头匹配
// ==========================================
#[derive(Debug, Clone)]
pub struct FuzzyHeaderMatcher {
    cutoff: f64,
}

impl Default for FuzzyHeaderMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_CUTOFF)
    }
}

impl FuzzyHeaderMatcher {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    /// 模糊匹配：取相似度最高的候选（并列取表头顺序靠前者）
    fn best_fuzzy_candidate<'a>(
        &self,
        target: &str,
        normalized: &'a [(String, &'a String)],
    ) -> Option<(&'a String, f64)> {
        let mut best: Option<(&String, f64)> = None;
        for (norm, raw) in normalized {
            if norm.is_empty() {
                continue;
            }
            let score = similarity(target, norm);
            if score < self.cutoff {
                continue;
            }
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((raw, score)),
            }
        }
        best
    }
}

impl HeaderMatcher for FuzzyHeaderMatcher {
    fn find_matching_column(
        &self,
        headers: &[String],
        target: &str,
        aliases: &[&str],
    ) -> Option<String> {
        let candidates: Vec<&str> = std::iter::once(target)
            .chain(aliases.iter().copied())
            .collect();

        // (a) 原样精确匹配
        for candidate in &candidates {
            if let Some(found) = headers.iter().find(|h| h.as_str() == *candidate) {
                debug!(target = %target, matched = %found, "表头精确匹配");
                return Some(found.clone());
            }
        }

        // (b) 归一化精确匹配（归一化后重名时后出现者覆盖）
        let normalized: Vec<(String, &String)> =
            headers.iter().map(|h| (normalize_header(h), h)).collect();
        let lookup: HashMap<&str, &String> = normalized
            .iter()
            .map(|(norm, raw)| (norm.as_str(), *raw))
            .collect();

        for candidate in &candidates {
            let norm = normalize_header(candidate);
            if let Some(found) = lookup.get(norm.as_str()) {
                debug!(target = %target, matched = %found, "表头归一化匹配");
                return Some((*found).clone());
            }
        }

        // (c) 模糊匹配（仅标准列名参与）
        let normalized_target = normalize_header(target);
        if normalized_target.is_empty() {
            return None;
        }
        match self.best_fuzzy_candidate(&normalized_target, &normalized) {
            Some((found, score)) => {
                info!(
                    target = %target,
                    matched = %found,
                    score = score,
                    "表头模糊匹配"
                );
                Some(found.clone())
            }
            None => None,
        }
    }
}
