// ==========================================
// 出货数据对账系统 - 存储层
// ==========================================
// 职责: 主数据版本存储、输出文件写入
// 红线: 存储层不含匹配/计算逻辑，不解析表格内容
// ==========================================

pub mod error;
pub mod master_store;
pub mod output_writer;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use master_store::{MasterStore, MasterVersion, StagedMaster};
pub use output_writer::{OutputWriter, StagedOutput};
