// ==========================================
// 制造单元价值流系统 - VSM 指标引擎编排
// ==========================================
// 职责: 工位集合 → 工序聚合 → 系统指标 的单次完整计算
// 调用方: 交互编辑器 (每次编辑) / 报表导出 / 列表摘要
// 红线: 不修改输入, 不持有可变状态, 每次返回全新结果
// ==========================================

use crate::config::engine_policy::EnginePolicy;
use crate::domain::metrics::{MetricsOptions, SystemMetrics};
use crate::domain::station::Station;
use crate::engine::step_aggregator::StepAggregator;
use crate::engine::system_metrics::SystemMetricsEngine;
use crate::engine::unit_cycle::UnitCycleCalculator;

// ==========================================
// VsmEngine - VSM 指标引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct VsmEngine {
    aggregator: StepAggregator,
    system: SystemMetricsEngine,
}

impl VsmEngine {
    /// 使用缺省口径创建引擎
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定口径创建引擎 (调用方负责先校验策略)
    pub fn with_policy(policy: EnginePolicy) -> Self {
        Self {
            aggregator: StepAggregator::new(UnitCycleCalculator::new(policy)),
            system: SystemMetricsEngine::new(),
        }
    }

    pub fn policy(&self) -> &EnginePolicy {
        self.aggregator.calculator().policy()
    }

    pub fn calculator(&self) -> &UnitCycleCalculator {
        self.aggregator.calculator()
    }

    /// 计算系统指标
    ///
    /// # 参数
    /// - `stations`: 工位集合 (顺序无关, 按 process_step 分组)
    /// - `options`: 原料供给约束等选项
    ///
    /// # 返回
    /// 全新的 SystemMetrics, 与输入无引用关联
    pub fn calculate(&self, stations: &[Station], options: &MetricsOptions) -> SystemMetrics {
        let steps = self.aggregator.aggregate(stations);
        let metrics = self.system.calculate(&steps, options);

        tracing::debug!(
            stations = stations.len(),
            steps = metrics.steps.len(),
            throughput_uph = metrics.system_throughput_uph,
            constraint = %metrics.constraint(),
            "vsm metrics calculated"
        );

        metrics
    }
}
