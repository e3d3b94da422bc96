// ==========================================
// 制造单元价值流系统 - 报表层
// ==========================================
// 职责: 计算结果导出为可读报表
// ==========================================

pub mod formatter;

pub use formatter::{ReportFormat, ReportFormatter};
