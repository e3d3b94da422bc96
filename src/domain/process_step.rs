// ==========================================
// 制造单元价值流系统 - 工序领域模型
// ==========================================
// 职责: 定义工序聚合结果 (派生, 临时对象)
// 红线: 同一工序的工位是并联机台, 产能相加而非取平均
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// StepCapacity - 工序产能 (聚合阶段输出)
// ==========================================
// 用途: Step Aggregator 输出, 尚不含利用率/等待时间
// 说明: 利用率与等待时间相对于系统约束, 需在系统层计算
#[derive(Debug, Clone, PartialEq)]
pub struct StepCapacity {
    pub step: i32,                   // 工序号
    pub station_ids: Vec<String>,    // 所含工位ID (输入顺序)
    pub station_names: Vec<String>,  // 显示名 (与 station_ids 一一对应)
    pub machine_count: usize,        // 机台数

    pub avg_station_ct_sec: f64,     // 单件节拍均值 (秒, 非产能口径)
    pub combined_rate_uph: f64,      // 并联合计产能 (件/小时)
    pub effective_ct_sec: f64,       // 工序有效节拍 (秒), 产能为 0 时为 +∞
    pub per_machine_avg_uph: f64,    // 单机平均产能 (件/小时)

    pub wip_before: f64,             // 工序上游在制品合计 (件)
}

impl StepCapacity {
    /// 是否零产能工序
    pub fn is_idle(&self) -> bool {
        self.combined_rate_uph <= 0.0
    }
}

// ==========================================
// ProcessStep - 工序 (系统层输出)
// ==========================================
// 红线: 所有字段有限, 不出现 ∞/NaN
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    // ===== 分组 =====
    pub step: i32,                   // 工序号
    pub station_ids: Vec<String>,    // 所含工位ID
    #[serde(default)]
    pub station_names: Vec<String>,  // 显示名 (报表使用)
    pub machine_count: usize,        // 机台数

    // ===== 节拍与产能 =====
    pub avg_station_ct_sec: f64,     // 单件节拍均值 (秒)
    pub combined_rate_uph: f64,      // 并联合计产能 (件/小时)
    pub effective_ct_sec: f64,       // 工序有效节拍 (秒), 零产能时为 0
    pub per_machine_avg_uph: f64,    // 单机平均产能 (件/小时)

    // ===== 在制品 =====
    pub wip_before: f64,             // 上游在制品 (件)

    // ===== 相对系统约束 =====
    pub avg_util_percent: f64,       // 利用率 (%)
    pub waiting_time_sec: f64,       // 单件等待时间 (秒)
    pub is_bottleneck: bool,         // 是否瓶颈工序
}
