// ==========================================
// 制造单元价值流系统 - 系统指标引擎
// ==========================================
// 职责: 合并全部工序 (+ 原料供给约束) 为系统指标
// 输入: StepCapacity 列表 + MetricsOptions
// 输出: SystemMetrics
// 红线: 原料约束时不标记任何工序为瓶颈
// 红线: 输出中不得出现 ∞/NaN, 失败一律以 0 表示
// ==========================================

mod core;


pub use self::core::SystemMetricsEngine;
