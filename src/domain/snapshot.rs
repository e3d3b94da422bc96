// ==========================================
// 制造单元价值流系统 - VSM 配置与指标快照
// ==========================================
// 职责: 定义持久化 blob 形态 + 保存时的指标快照
// 红线: 快照仅供列表摘要, 不作为权威数据, 当前指标必须重新计算
// ==========================================

use crate::domain::metrics::{MetricsOptions, SystemMetrics};
use crate::domain::station::Station;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// MetricsSnapshot - 指标快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub system_throughput_uph: f64,       // 保存时的系统产出
    pub process_efficiency_percent: f64,  // 保存时的流程效率
    pub captured_at: DateTime<Utc>,       // 快照时间
}

impl MetricsSnapshot {
    /// 从计算结果截取快照
    pub fn capture(metrics: &SystemMetrics) -> Self {
        Self::capture_at(metrics, Utc::now())
    }

    pub fn capture_at(metrics: &SystemMetrics, captured_at: DateTime<Utc>) -> Self {
        Self {
            system_throughput_uph: metrics.system_throughput_uph,
            process_efficiency_percent: metrics.process_efficiency_percent,
            captured_at,
        }
    }

    /// 快照与当前指标是否一致
    pub fn matches(&self, metrics: &SystemMetrics) -> bool {
        self.system_throughput_uph == metrics.system_throughput_uph
            && self.process_efficiency_percent == metrics.process_efficiency_percent
    }
}

// ==========================================
// VsmConfiguration - 已保存的价值流图
// ==========================================
// 存储: 持久层把整个对象当作不透明 JSON blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VsmConfiguration {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub stations: Vec<Station>,

    /// 原料供给速率 (件/小时)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_material_uph: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<MetricsSnapshot>,
}

impl VsmConfiguration {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stations: Vec<Station>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            stations,
            raw_material_uph: None,
            snapshot: None,
        }
    }

    /// 计算选项
    pub fn options(&self) -> MetricsOptions {
        MetricsOptions {
            raw_material_uph: self.raw_material_uph,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_blob_without_optional_fields() {
        let raw = r#"{"id":"VSM-1","name":"装配线","stations":[{"id":"S1","cycleTime":30}]}"#;
        let config = VsmConfiguration::from_json(raw).unwrap();

        assert_eq!(config.stations.len(), 1);
        assert_eq!(config.raw_material_uph, None);
        assert!(config.snapshot.is_none());
        assert_eq!(config.options(), MetricsOptions::default());
    }

    #[test]
    fn test_snapshot_matches_metrics() {
        let mut metrics = SystemMetrics::empty();
        metrics.system_throughput_uph = 60.0;
        metrics.process_efficiency_percent = 75.0;

        let snapshot = MetricsSnapshot::capture(&metrics);
        assert!(snapshot.matches(&metrics));

        metrics.system_throughput_uph = 40.0;
        assert!(!snapshot.matches(&metrics));
    }
}
