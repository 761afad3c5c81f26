// ==========================================
// 出货数据对账系统 - 原始表
// ==========================================
// 用途: 文件解析产物（列名 → 文本值），不做任何类型转换
// 生命周期: 仅在单次运行内
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RawTable - 原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    headers: Vec<String>,             // 列名（保持源文件顺序，唯一）
    rows: Vec<HashMap<String, String>>, // 行记录
}

impl RawTable {
    /// 由表头创建空表
    ///
    /// 重复列名按出现顺序追加 `.1`, `.2` 后缀，保证列名唯一
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for header in headers {
            let header = header.into();
            let mut candidate = header.clone();
            let mut suffix = 1;
            while unique.contains(&candidate) {
                candidate = format!("{}.{}", header, suffix);
                suffix += 1;
            }
            unique.push(candidate);
        }

        Self {
            headers: unique,
            rows: Vec::new(),
        }
    }

    /// 按列序追加一行（多余的值丢弃，缺失的值视为空）
    pub fn push_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: HashMap<String, String> = HashMap::with_capacity(self.headers.len());
        for (header, value) in self.headers.iter().zip(values) {
            row.insert(header.clone(), value.into());
        }
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 读取单元格（列不存在或值缺失返回 None）
    pub fn cell(&self, row: usize, label: &str) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(label))
            .map(|v| v.as_str())
    }
}
