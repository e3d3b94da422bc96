// ==========================================
// 制造单元价值流系统 - 指标报表格式化
// ==========================================
// 职责: SystemMetrics → 可读报表 (Markdown / 纯文本)
// 红线: 哨兵 0 (无产出导致的节拍) 显示为 "-", 不显示为 0
// ==========================================

use crate::domain::metrics::SystemMetrics;
use crate::domain::process_step::ProcessStep;
use crate::domain::types::SystemConstraint;
use crate::engine::unit_cycle::SECONDS_PER_HOUR;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// 空值占位
const PLACEHOLDER: &str = "-";

/// 报表格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportFormat {
    Markdown,
    PlainText,
}

impl ReportFormat {
    /// 从字符串解析 (markdown/md/text/txt/plain)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "text" | "txt" | "plain" | "plaintext" => Some(ReportFormat::PlainText),
            _ => None,
        }
    }
}

// ==========================================
// ReportFormatter - 报表格式化器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter {
    format: ReportFormat,
    decimals: usize,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportFormat::Markdown, 2)
    }
}

impl ReportFormatter {
    pub fn new(format: ReportFormat, decimals: usize) -> Self {
        Self { format, decimals }
    }

    pub fn with_format(self, format: ReportFormat) -> Self {
        Self { format, ..self }
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// 渲染报表
    pub fn render(&self, title: &str, metrics: &SystemMetrics) -> String {
        let summary = self.summary_rows(metrics);
        let mut out = String::new();

        match self.format {
            ReportFormat::Markdown => {
                let _ = writeln!(out, "# {}\n", title);
                if metrics.is_empty() {
                    let _ = writeln!(out, "_无工位数据_");
                    return out;
                }

                let _ = writeln!(out, "## 系统指标\n");
                let _ = writeln!(out, "| 指标 | 数值 |");
                let _ = writeln!(out, "|---|---|");
                for (label, value) in &summary {
                    let _ = writeln!(out, "| {} | {} |", label, value);
                }

                let _ = writeln!(out, "\n## 工序明细\n");
                let _ = writeln!(out, "| {} |", STEP_HEADERS.join(" | "));
                let _ = writeln!(out, "|{}", "---|".repeat(STEP_HEADERS.len()));
                for step in &metrics.steps {
                    let _ = writeln!(out, "| {} |", self.step_cells(step).join(" | "));
                }
            }
            ReportFormat::PlainText => {
                let _ = writeln!(out, "{}", title);
                let _ = writeln!(out, "{}", "=".repeat(title.chars().count().max(8)));
                if metrics.is_empty() {
                    let _ = writeln!(out, "无工位数据");
                    return out;
                }

                let label_width = summary
                    .iter()
                    .map(|(l, _)| l.chars().count())
                    .max()
                    .unwrap_or(0);
                for (label, value) in &summary {
                    let pad = label_width - label.chars().count();
                    let _ = writeln!(out, "{}{}  {}", label, " ".repeat(pad), value);
                }

                let _ = writeln!(out);
                let _ = writeln!(out, "{}", STEP_HEADERS.join("\t"));
                for step in &metrics.steps {
                    let _ = writeln!(out, "{}", self.step_cells(step).join("\t"));
                }
            }
        }

        out
    }

    fn num(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }

    /// 哨兵 0 显示为占位符
    fn num_or_placeholder(&self, value: f64) -> String {
        if value > 0.0 {
            self.num(value)
        } else {
            PLACEHOLDER.to_string()
        }
    }

    fn summary_rows(&self, metrics: &SystemMetrics) -> Vec<(&'static str, String)> {
        let constraint = match metrics.constraint() {
            SystemConstraint::None => PLACEHOLDER.to_string(),
            SystemConstraint::ProcessStep(step) => format!("工序 {}", step),
            SystemConstraint::RawMaterial => format!(
                "原料供给 ({} UPH)",
                self.num(metrics.raw_material_uph.unwrap_or(metrics.system_throughput_uph))
            ),
        };

        vec![
            ("系统产出 (UPH)", self.num(metrics.system_throughput_uph)),
            ("工序产能 (UPH)", self.num(metrics.process_capacity_uph)),
            ("系统节拍 (秒)", self.num_or_placeholder(metrics.system_ct_sec)),
            ("系统约束", constraint),
            ("工位数", metrics.station_count().to_string()),
            ("增值时间 (秒)", self.num(metrics.value_add_time_sec)),
            ("等待时间 (秒)", self.num(metrics.total_waiting_time_sec)),
            (
                "交付周期",
                format!(
                    "{} 秒 ({} 小时)",
                    self.num(metrics.total_lead_time_sec),
                    self.num(metrics.total_lead_time_sec / SECONDS_PER_HOUR)
                ),
            ),
            ("在制品 (件)", self.num(metrics.total_wip)),
            ("流程效率 (%)", self.num(metrics.process_efficiency_percent)),
            ("平均利用率 (%)", self.num(metrics.avg_utilization_percent)),
        ]
    }

    fn step_cells(&self, step: &ProcessStep) -> Vec<String> {
        vec![
            step.step.to_string(),
            step.station_names.join(", "),
            step.machine_count.to_string(),
            self.num(step.avg_station_ct_sec),
            self.num(step.combined_rate_uph),
            self.num_or_placeholder(step.effective_ct_sec),
            self.num(step.avg_util_percent),
            self.num(step.waiting_time_sec),
            self.num(step.wip_before),
            if step.is_bottleneck { "★".to_string() } else { String::new() },
        ]
    }
}

const STEP_HEADERS: [&str; 10] = [
    "工序",
    "工位",
    "机台数",
    "单件节拍 (秒)",
    "合计产能 (UPH)",
    "有效节拍 (秒)",
    "利用率 (%)",
    "等待 (秒)",
    "在制品",
    "瓶颈",
];
