use crate::domain::metrics::{MetricsOptions, SystemMetrics};
use crate::domain::process_step::{ProcessStep, StepCapacity};
use crate::engine::unit_cycle::SECONDS_PER_HOUR;

// ==========================================
// SystemMetricsEngine - 系统指标引擎
// ==========================================
// 无状态引擎, 单次遍历完成计算
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMetricsEngine;

/// 约束判定结果
struct ConstraintResolution {
    process_capacity_uph: f64,
    system_throughput_uph: f64,
    bottleneck_step: Option<i32>,
    raw_material_uph: Option<f64>,
    is_raw_material_bottleneck: bool,
}

impl SystemMetricsEngine {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算系统指标
    ///
    /// 步骤:
    /// 1) 工序产能 = min(combinedRateUPH)
    /// 2) 原料速率为正且严格低于工序产能 → 原料约束, 否则最低产能工序为瓶颈 (同值取先)
    /// 3) 系统节拍 = 3600 / 系统产出
    /// 4) 各工序利用率、等待时间 (相对系统节拍)
    /// 5) 增值时间、等待时间、交付周期、流程效率、平均利用率、在制品合计
    pub fn calculate(&self, steps: &[StepCapacity], options: &MetricsOptions) -> SystemMetrics {
        if steps.is_empty() {
            return SystemMetrics::empty();
        }

        let resolution = Self::resolve_constraint(steps, options);
        let system_throughput_uph = resolution.system_throughput_uph;
        let system_ct_sec = if system_throughput_uph > 0.0 {
            finite_or_zero(SECONDS_PER_HOUR / system_throughput_uph)
        } else {
            0.0
        };

        let mut value_add_time_sec = 0.0;
        let mut total_waiting_time_sec = 0.0;
        let mut util_sum = 0.0;
        let mut total_wip = 0.0;

        let mut process_steps: Vec<ProcessStep> = Vec::with_capacity(steps.len());
        for cap in steps {
            let mut step = Self::finish_step(cap, system_throughput_uph, system_ct_sec);
            step.is_bottleneck = resolution.bottleneck_step == Some(step.step);

            value_add_time_sec += step.avg_station_ct_sec;
            total_waiting_time_sec += step.waiting_time_sec;
            util_sum += step.avg_util_percent;
            total_wip += step.wip_before;

            process_steps.push(step);
        }

        let value_add_time_sec = finite_or_zero(value_add_time_sec);
        let total_waiting_time_sec = finite_or_zero(total_waiting_time_sec);
        let total_lead_time_sec = finite_or_zero(value_add_time_sec + total_waiting_time_sec);
        let process_efficiency_percent = if total_lead_time_sec > 0.0 {
            finite_or_zero(value_add_time_sec / total_lead_time_sec * 100.0)
        } else {
            0.0
        };
        let avg_utilization_percent = finite_or_zero(util_sum / process_steps.len() as f64);
        let total_wip = finite_or_zero(total_wip);

        SystemMetrics {
            steps: process_steps,
            process_capacity_uph: resolution.process_capacity_uph,
            system_throughput_uph,
            system_ct_sec,
            value_add_time_sec,
            total_waiting_time_sec,
            total_lead_time_sec,
            process_efficiency_percent,
            avg_utilization_percent,
            total_wip,
            bottleneck_step: resolution.bottleneck_step,
            is_raw_material_bottleneck: resolution.is_raw_material_bottleneck,
            raw_material_uph: resolution.raw_material_uph,
        }
    }

    /// 判定系统约束
    fn resolve_constraint(steps: &[StepCapacity], options: &MetricsOptions) -> ConstraintResolution {
        // 最低产能工序 (严格小于才替换, 同值保留工序号靠前者)
        let mut slowest = &steps[0];
        for cap in &steps[1..] {
            if cap.combined_rate_uph < slowest.combined_rate_uph {
                slowest = cap;
            }
        }
        let process_capacity_uph = slowest.combined_rate_uph;
        let raw_material_uph = options.effective_raw_material_uph();

        match raw_material_uph {
            Some(rate) if rate < process_capacity_uph => ConstraintResolution {
                process_capacity_uph,
                system_throughput_uph: rate,
                bottleneck_step: None,
                raw_material_uph,
                is_raw_material_bottleneck: true,
            },
            _ => ConstraintResolution {
                process_capacity_uph,
                system_throughput_uph: process_capacity_uph,
                bottleneck_step: Some(slowest.step),
                raw_material_uph,
                is_raw_material_bottleneck: false,
            },
        }
    }

    /// 工序终值: 利用率 + 等待时间, ∞ 节拍归一为 0
    fn finish_step(cap: &StepCapacity, system_throughput_uph: f64, system_ct_sec: f64) -> ProcessStep {
        let avg_util_percent = if cap.is_idle() {
            0.0
        } else {
            finite_or_zero(system_throughput_uph / cap.combined_rate_uph * 100.0)
        };
        let waiting_time_sec = finite_or_zero((system_ct_sec - cap.effective_ct_sec).max(0.0));
        let effective_ct_sec = finite_or_zero(cap.effective_ct_sec);

        ProcessStep {
            step: cap.step,
            station_ids: cap.station_ids.clone(),
            station_names: cap.station_names.clone(),
            machine_count: cap.machine_count,
            avg_station_ct_sec: finite_or_zero(cap.avg_station_ct_sec),
            combined_rate_uph: finite_or_zero(cap.combined_rate_uph),
            effective_ct_sec,
            per_machine_avg_uph: finite_or_zero(cap.per_machine_avg_uph),
            wip_before: finite_or_zero(cap.wip_before),
            avg_util_percent,
            waiting_time_sec,
            is_bottleneck: false,
        }
    }
}

/// 非有限值归一为哨兵 0 (输出中不出现 ∞/NaN)
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
