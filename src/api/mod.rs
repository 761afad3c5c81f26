// ==========================================
// 出货数据对账系统 - API层
// ==========================================
// 职责: 对外统一入口（命令行与库调用共用）
// ==========================================

pub mod error;
pub mod recon_api;

pub use error::{ApiError, ApiResult};
pub use recon_api::{ApiResponse, ReconApi};
