// ==========================================
// 制造单元价值流系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件访问逻辑, 不含引擎逻辑
// ==========================================

pub mod import;
pub mod metrics;
pub mod process_step;
pub mod snapshot;
pub mod station;
pub mod types;

// 重导出核心类型
pub use import::{DqReport, DqSummary, DqViolation};
pub use metrics::{MetricsOptions, SystemMetrics};
pub use process_step::{ProcessStep, StepCapacity};
pub use snapshot::{MetricsSnapshot, VsmConfiguration};
pub use station::Station;
pub use types::{DqLevel, SystemConstraint};
