// ==========================================
// 制造单元价值流系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 系统约束 (System Constraint)
// ==========================================
// 用途: 标识限制系统产出的环节
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind", content = "step")]
pub enum SystemConstraint {
    None,             // 无数据 (空工位集合)
    ProcessStep(i32), // 工序瓶颈
    RawMaterial,      // 原料供给约束 (外部)
}

impl fmt::Display for SystemConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemConstraint::None => write!(f, "NONE"),
            SystemConstraint::ProcessStep(step) => write!(f, "PROCESS_STEP({})", step),
            SystemConstraint::RawMaterial => write!(f, "RAW_MATERIAL"),
        }
    }
}

// ==========================================
// 数据质量级别 (DQ Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,    // 错误 (阻断导入)
    Warning,  // 警告 (引擎将使用缺省值)
    Info,     // 提示 (仅记录)
    Conflict, // 冲突 (重复工位ID)
}

impl fmt::Display for DqLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DqLevel::Error => write!(f, "ERROR"),
            DqLevel::Warning => write!(f, "WARNING"),
            DqLevel::Info => write!(f, "INFO"),
            DqLevel::Conflict => write!(f, "CONFLICT"),
        }
    }
}
