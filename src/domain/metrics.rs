// ==========================================
// 制造单元价值流系统 - 系统指标领域模型
// ==========================================
// 职责: 定义引擎唯一输出 SystemMetrics 及调用选项
// 红线: 输出为不可变值对象, 每次调用全新生成, 不被引擎持有
// ==========================================

use crate::domain::process_step::ProcessStep;
use crate::domain::types::SystemConstraint;
use serde::{Deserialize, Serialize};

// ==========================================
// MetricsOptions - 调用选项
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsOptions {
    /// 原料供给速率 (件/小时), 低于工序产能时成为系统约束
    #[serde(default)]
    pub raw_material_uph: Option<f64>,
}

impl MetricsOptions {
    pub fn with_raw_material_uph(raw_material_uph: f64) -> Self {
        Self {
            raw_material_uph: Some(raw_material_uph),
        }
    }

    /// 有效的原料速率 (须为正的有限值)
    pub fn effective_raw_material_uph(&self) -> Option<f64> {
        self.raw_material_uph
            .filter(|v| v.is_finite() && *v > 0.0)
    }
}

// ==========================================
// SystemMetrics - 系统指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    // ===== 工序明细 (按工序号升序) =====
    pub steps: Vec<ProcessStep>,

    // ===== 产出 =====
    pub process_capacity_uph: f64,       // 工序产能 = min(combinedRateUPH)
    pub system_throughput_uph: f64,      // 系统产出 (件/小时)
    pub system_ct_sec: f64,              // 系统节拍 (秒), 产出为 0 时为 0

    // ===== 时间 =====
    pub value_add_time_sec: f64,         // 增值时间 (秒)
    pub total_waiting_time_sec: f64,     // 总等待时间 (秒)
    pub total_lead_time_sec: f64,        // 总交付周期 (秒)

    // ===== 效率 =====
    pub process_efficiency_percent: f64, // 流程效率 (%)
    pub avg_utilization_percent: f64,    // 平均利用率 (%)

    // ===== 在制品 =====
    pub total_wip: f64,                  // 在制品合计 (件)

    // ===== 约束 =====
    pub bottleneck_step: Option<i32>,    // 瓶颈工序号 (原料约束时为空)
    pub is_raw_material_bottleneck: bool,
    pub raw_material_uph: Option<f64>,   // 生效的原料速率
}

impl SystemMetrics {
    /// 空结果 (无工位)
    pub fn empty() -> Self {
        Self {
            steps: Vec::new(),
            process_capacity_uph: 0.0,
            system_throughput_uph: 0.0,
            system_ct_sec: 0.0,
            value_add_time_sec: 0.0,
            total_waiting_time_sec: 0.0,
            total_lead_time_sec: 0.0,
            process_efficiency_percent: 0.0,
            avg_utilization_percent: 0.0,
            total_wip: 0.0,
            bottleneck_step: None,
            is_raw_material_bottleneck: false,
            raw_material_uph: None,
        }
    }

    /// 是否无数据 (调用方应据此分支, 而非视为错误)
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 单元平衡率 (流程效率的别名)
    pub fn cell_balance_percent(&self) -> f64 {
        self.process_efficiency_percent
    }

    /// 系统约束
    pub fn constraint(&self) -> SystemConstraint {
        if self.is_raw_material_bottleneck {
            SystemConstraint::RawMaterial
        } else if let Some(step) = self.bottleneck_step {
            SystemConstraint::ProcessStep(step)
        } else {
            SystemConstraint::None
        }
    }

    /// 瓶颈工序明细
    pub fn bottleneck(&self) -> Option<&ProcessStep> {
        let step = self.bottleneck_step?;
        self.steps.iter().find(|s| s.step == step)
    }

    /// 工位总数
    pub fn station_count(&self) -> usize {
        self.steps.iter().map(|s| s.machine_count).sum()
    }
}
