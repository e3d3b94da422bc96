// ==========================================
// 制造单元价值流系统 - API 层
// ==========================================
// 职责: 提供编辑器 / 导出 / 列表视图调用的接口
// ==========================================

pub mod error;
pub mod vsm_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use vsm_api::{ConfigurationSummary, VsmApi};
