// ==========================================
// 制造单元价值流系统 - 工位领域模型
// ==========================================
// 职责: 定义 VSM 输入记录 (工位)
// 红线: 工位由编辑界面拥有, 引擎只读, 不做任何修改
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Station - 价值流工位
// ==========================================
// 用途: 引擎输入, 同一 process_step 的工位视为并联机台
// 序列化格式: camelCase (与编辑器保存的 JSON blob 一致)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    // ===== 标识 =====
    pub id: String,                     // 工位ID (集合内唯一)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,           // 显示名称 (仅报表使用)

    // ===== 分组 =====
    #[serde(default)]
    pub process_step: Option<i32>,      // 工序号 (缺省 1)

    // ===== 时间参数 =====
    #[serde(default)]
    pub cycle_time: Option<f64>,        // 单件节拍 (秒)
    #[serde(default)]
    pub setup_time: Option<f64>,        // 每批换型时间 (秒)
    #[serde(default)]
    pub batch_size: Option<f64>,        // 每次换型的批量 (件)
    #[serde(default)]
    pub uptime_percent: Option<f64>,    // 开动率 (0-100)

    // ===== 在制品 =====
    #[serde(default)]
    pub wip_before: Option<f64>,        // 工位上游缓存在制品 (件)
}

impl Station {
    /// 创建仅有 ID 的工位, 其余字段全部走缺省规则
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            process_step: None,
            cycle_time: None,
            setup_time: None,
            batch_size: None,
            uptime_percent: None,
            wip_before: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_step(mut self, process_step: i32) -> Self {
        self.process_step = Some(process_step);
        self
    }

    pub fn with_cycle_time(mut self, cycle_time_sec: f64) -> Self {
        self.cycle_time = Some(cycle_time_sec);
        self
    }

    /// 设置换型参数 (换型时间 + 批量)
    pub fn with_setup(mut self, setup_time_sec: f64, batch_size: f64) -> Self {
        self.setup_time = Some(setup_time_sec);
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_uptime(mut self, uptime_percent: f64) -> Self {
        self.uptime_percent = Some(uptime_percent);
        self
    }

    pub fn with_wip_before(mut self, wip_before: f64) -> Self {
        self.wip_before = Some(wip_before);
        self
    }

    /// 工序号 (缺省 1)
    pub fn step_key(&self) -> i32 {
        self.process_step.unwrap_or(1)
    }

    /// 上游在制品 (缺省 0, 负数/非有限值按 0 处理)
    pub fn wip_units(&self) -> f64 {
        match self.wip_before {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => 0.0,
        }
    }

    /// 报表显示名 (无名称时回退到 ID)
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// 取有限值 (NaN/±∞ 视为缺失)
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
