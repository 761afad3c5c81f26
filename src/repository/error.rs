// ==========================================
// 出货数据对账系统 - 存储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 存储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 版本错误 =====
    #[error("没有当前主数据版本")]
    NoCurrentVersion,

    #[error("没有可回滚的主数据版本")]
    NoPreviousVersion,

    #[error("版本文件缺失: version_id={version_id}, path={path}")]
    VersionFileMissing { version_id: String, path: String },

    #[error("版本清单损坏: {0}")]
    ManifestCorrupted(String),

    // ===== 文件系统错误 =====
    #[error("文件系统操作失败: {0}")]
    FileSystemError(String),

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::FileSystemError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::ManifestCorrupted(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for RepositoryError {
    fn from(err: csv::Error) -> Self {
        RepositoryError::CsvWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
