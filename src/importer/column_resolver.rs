// ==========================================
// 出货数据对账系统 - 列映射解析
// ==========================================
// 职责: 源表头 → 标准列映射（每个标准列唯一对应一个源列）
// 红线: 必填列任一缺失，整表失败，且一次性报告全部缺失列
// ==========================================

use crate::domain::table::RawTable;
use crate::domain::types::{CanonicalColumn, SourceKind};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::HeaderMatcher;
use std::collections::HashMap;
use tracing::{info, warn};

// ==========================================
// ColumnMapping - 标准列 → 源列名
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    columns: HashMap<CanonicalColumn, String>,
}

impl ColumnMapping {
    /// 源列名（可选列未解析时为 None）
    pub fn label(&self, column: CanonicalColumn) -> Option<&str> {
        self.columns.get(&column).map(|s| s.as_str())
    }

    /// 读取某行的标准列单元格（未映射或缺失返回 None）
    pub fn value<'a>(
        &self,
        table: &'a RawTable,
        row: usize,
        column: CanonicalColumn,
    ) -> Option<&'a str> {
        self.label(column).and_then(|label| table.cell(row, label))
    }

    /// 读取某行的标准列单元格（缺失视为空串）
    pub fn text(&self, table: &RawTable, row: usize, column: CanonicalColumn) -> String {
        self.value(table, row, column).unwrap_or("").to_string()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ==========================================
// ColumnResolver
// ==========================================
pub struct ColumnResolver<'m> {
    matcher: &'m dyn HeaderMatcher,
}

impl<'m> ColumnResolver<'m> {
    pub fn new(matcher: &'m dyn HeaderMatcher) -> Self {
        Self { matcher }
    }

    /// 解析单个标准列
    ///
    /// # 返回
    /// - Ok(Some(label)): 匹配成功
    /// - Ok(None): 未匹配且非必填
    /// - Err(MissingColumns): 未匹配且必填
    pub fn resolve(
        &self,
        table: &RawTable,
        column: CanonicalColumn,
        required: bool,
        source_kind: SourceKind,
    ) -> ImportResult<Option<String>> {
        let found =
            self.matcher
                .find_matching_column(table.headers(), column.label(), column.aliases());

        match found {
            Some(label) => Ok(Some(label)),
            None if required => Err(ImportError::MissingColumns {
                source_kind,
                missing: vec![column.label().to_string()],
            }),
            None => Ok(None),
        }
    }

    /// 解析某类源表的全部标准列
    pub fn resolve_all(&self, table: &RawTable, source_kind: SourceKind) -> ImportResult<ColumnMapping> {
        let mut mapping = ColumnMapping::default();
        let mut missing = Vec::new();

        for &column in source_kind.columns() {
            match self.resolve(table, column, column.is_required(), source_kind) {
                Ok(Some(label)) => {
                    info!(
                        source = %source_kind,
                        column = %column,
                        matched = %label,
                        "列映射"
                    );
                    mapping.columns.insert(column, label);
                }
                Ok(None) => {
                    info!(source = %source_kind, column = %column, "可选列未找到，使用默认值");
                }
                Err(_) => {
                    warn!(source = %source_kind, column = %column, "必需列未找到");
                    missing.push(column.label().to_string());
                }
            }
        }

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                source_kind,
                missing,
            });
        }

        Ok(mapping)
    }
}
