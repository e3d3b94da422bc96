// ==========================================
// 制造单元价值流系统 - 引擎层
// ==========================================
// 职责: VSM 指标计算规则, 纯函数, 无 I/O
// 红线: 引擎从不报错, 退化输入以哨兵值 0 表达
// ==========================================

pub mod orchestrator;
pub mod step_aggregator;
pub mod system_metrics;
pub mod unit_cycle;

// 重导出核心引擎
pub use orchestrator::VsmEngine;
pub use step_aggregator::StepAggregator;
pub use system_metrics::SystemMetricsEngine;
pub use unit_cycle::{UnitCycleCalculator, SECONDS_PER_HOUR};
