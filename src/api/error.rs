// ==========================================
// 出货数据对账系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把导入/存储层错误转换为面向用户的错误消息
// 说明: Display 为日志文案（中文）；user_message 按当前语言输出
// ==========================================

use crate::domain::types::SourceKind;
use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("文件不存在: {0}")]
    NotFound(String),

    #[error("文件格式不支持: {0}")]
    UnsupportedFormat(String),

    /// 必需列缺失（整表失败，不产生输出）
    #[error("表结构错误: {source_kind} 表缺少必需列: {}", .missing.join(", "))]
    SchemaError {
        source_kind: SourceKind,
        missing: Vec<String>,
    },

    #[error("文件无表头: {0}")]
    MissingHeader(String),

    #[error("工作簿无工作表: {0}")]
    EmptyWorkbook(String),

    #[error("文件读取失败: {0}")]
    ReadFailed(String),

    // ==========================================
    // 主数据版本错误
    // ==========================================
    #[error("尚未上传主数据")]
    NoMasterData,

    #[error("没有可回滚的主数据版本")]
    NoPreviousVersion,

    // ==========================================
    // 存储与配置错误
    // ==========================================
    #[error("存储错误: {0}")]
    StorageError(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// 返回给调用方的消息（当前语言）
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound(path) => {
                t_with_args("import.file_not_found", &[("path", path.as_str())])
            }
            ApiError::UnsupportedFormat(ext) => {
                t_with_args("import.unsupported_format", &[("ext", ext.as_str())])
            }
            ApiError::SchemaError {
                source_kind,
                missing,
            } => {
                let source = source_kind.to_string();
                let columns = missing.join(", ");
                t_with_args(
                    "import.missing_columns",
                    &[("source", source.as_str()), ("columns", columns.as_str())],
                )
            }
            ApiError::MissingHeader(path) => {
                t_with_args("import.missing_header", &[("path", path.as_str())])
            }
            ApiError::EmptyWorkbook(path) => {
                t_with_args("import.empty_workbook", &[("path", path.as_str())])
            }
            ApiError::ReadFailed(detail) => {
                t_with_args("import.read_failed", &[("detail", detail.as_str())])
            }
            ApiError::NoMasterData => t("recon.no_master"),
            ApiError::NoPreviousVersion => t("recon.no_previous_master"),
            ApiError::StorageError(detail) => {
                t_with_args("recon.storage_failed", &[("detail", detail.as_str())])
            }
            ApiError::ConfigError(detail) => {
                t_with_args("recon.config_failed", &[("detail", detail.as_str())])
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::MissingColumns {
                source_kind,
                missing,
            } => ApiError::SchemaError {
                source_kind,
                missing,
            },
            ImportError::FileNotFound(path) => ApiError::NotFound(path),
            ImportError::UnsupportedFormat(ext) => ApiError::UnsupportedFormat(ext),
            ImportError::MissingHeaderRow(path) => ApiError::MissingHeader(path),
            ImportError::EmptyWorkbook(path) => ApiError::EmptyWorkbook(path),
            ImportError::FileReadError(detail)
            | ImportError::CsvParseError(detail)
            | ImportError::ExcelParseError(detail) => ApiError::ReadFailed(detail),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NoCurrentVersion => ApiError::NoMasterData,
            RepositoryError::NoPreviousVersion => ApiError::NoPreviousVersion,
            other => ApiError::StorageError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
