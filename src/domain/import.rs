// ==========================================
// 制造单元价值流系统 - 导入数据质量模型
// ==========================================

use crate::domain::types::DqLevel;
use serde::{Deserialize, Serialize};

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,             // 原始文件行号
    pub station_id: Option<String>,    // 工位ID (如果可解析)
    pub level: DqLevel,                // 违规级别
    pub field: String,                 // 违规字段
    pub message: String,               // 违规描述
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize,    // 总行数
    pub success: usize,       // 成功导入
    pub blocked: usize,       // 阻断 (ERROR)
    pub warning: usize,       // 警告 (WARNING)
    pub conflict: usize,      // 冲突 (CONFLICT)
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub batch_id: String,              // 批次 ID
    pub summary: DqSummary,            // 汇总统计
    pub violations: Vec<DqViolation>,  // 违规明细
}

impl DqReport {
    /// 指定级别的违规数量
    pub fn count_level(&self, level: DqLevel) -> usize {
        self.violations.iter().filter(|v| v.level == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count_level(DqLevel::Error) > 0
    }
}
