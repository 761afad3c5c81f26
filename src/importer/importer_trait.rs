// ==========================================
// 出货数据对账系统 - 导入接口 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::domain::table::RawTable;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录（全部为文本，已 TRIM，跳过全空行）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// HeaderMatcher Trait
// ==========================================
// 用途: 表头匹配接口
// 实现者: FuzzyHeaderMatcher
pub trait HeaderMatcher: Send + Sync {
    /// 在原始表头中查找与目标列名最匹配的列
    ///
    /// # 参数
    /// - headers: 原始表头
    /// - target: 标准列名
    /// - aliases: 别名（只参与精确/归一化匹配）
    ///
    /// # 返回
    /// - Some(label): 源表中的实际列名
    /// - None: 三级匹配均失败
    fn find_matching_column(
        &self,
        headers: &[String],
        target: &str,
        aliases: &[&str],
    ) -> Option<String>;
}
