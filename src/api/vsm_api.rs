// ==========================================
// 制造单元价值流系统 - 价值流 API
// ==========================================
// 职责: 编辑器 / 导出 / 列表视图的统一入口
// 红线: 列表摘要必须重新计算, 保存时的快照只用于对比
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::config::engine_policy::EnginePolicy;
use crate::domain::metrics::{MetricsOptions, SystemMetrics};
use crate::domain::snapshot::{MetricsSnapshot, VsmConfiguration};
use crate::domain::station::Station;
use crate::domain::types::SystemConstraint;
use crate::engine::VsmEngine;
use crate::importer::station_importer::{StationImportOutcome, StationImporter};
use crate::perf::PerfGuard;
use crate::report::formatter::{ReportFormat, ReportFormatter};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// ConfigurationSummary - 列表视图摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSummary {
    pub id: String,
    pub name: String,
    pub station_count: usize,
    pub system_throughput_uph: f64,      // 当前重新计算的产出
    pub process_efficiency_percent: f64, // 当前重新计算的效率
    pub constraint: SystemConstraint,
    pub stale_snapshot: Option<MetricsSnapshot>,
    pub snapshot_is_current: bool,       // 无快照时为 false
}

// ==========================================
// VsmApi
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct VsmApi {
    engine: VsmEngine,
    formatter: ReportFormatter,
}

impl VsmApi {
    pub fn new(engine: VsmEngine, formatter: ReportFormatter) -> Self {
        Self { engine, formatter }
    }

    /// 按配置构造 (引擎口径 + 报表小数位)
    pub fn from_config(config: &ConfigManager) -> ApiResult<Self> {
        let policy = config.get_engine_policy()?;
        let decimals = config.get_report_decimals()?;
        Ok(Self::new(
            VsmEngine::with_policy(policy),
            ReportFormatter::new(ReportFormat::Markdown, decimals),
        ))
    }

    pub fn policy(&self) -> &EnginePolicy {
        self.engine.policy()
    }

    // ==========================================
    // 计算
    // ==========================================

    /// 编辑器每次修改后调用
    pub fn calculate(&self, stations: &[Station], options: &MetricsOptions) -> SystemMetrics {
        let _perf = PerfGuard::new("vsm_calculate");
        self.engine.calculate(stations, options)
    }

    pub fn calculate_configuration(&self, config: &VsmConfiguration) -> SystemMetrics {
        let _perf = PerfGuard::new("vsm_calculate_configuration");
        self.engine.calculate(&config.stations, &config.options())
    }

    /// 保存时截取快照
    pub fn capture_snapshot(&self, config: &VsmConfiguration) -> MetricsSnapshot {
        let _perf = PerfGuard::new("vsm_capture_snapshot");
        let metrics = self.engine.calculate(&config.stations, &config.options());
        MetricsSnapshot::capture(&metrics)
    }

    /// 列表视图摘要
    pub fn summarize_many(&self, configs: &[VsmConfiguration]) -> Vec<ConfigurationSummary> {
        let _perf = PerfGuard::new("vsm_summarize_many");

        configs
            .iter()
            .map(|config| {
                let metrics = self.engine.calculate(&config.stations, &config.options());
                let snapshot_is_current = config
                    .snapshot
                    .as_ref()
                    .map(|s| s.matches(&metrics))
                    .unwrap_or(false);
                if config.snapshot.is_some() && !snapshot_is_current {
                    debug!(config_id = %config.id, "保存快照与当前指标不一致");
                }

                ConfigurationSummary {
                    id: config.id.clone(),
                    name: config.name.clone(),
                    station_count: config.stations.len(),
                    system_throughput_uph: metrics.system_throughput_uph,
                    process_efficiency_percent: metrics.process_efficiency_percent,
                    constraint: metrics.constraint(),
                    stale_snapshot: config.snapshot.clone(),
                    snapshot_is_current,
                }
            })
            .collect()
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出报表文本
    pub fn export_report(&self, config: &VsmConfiguration, format: ReportFormat) -> String {
        let _perf = PerfGuard::new("vsm_export_report");
        let metrics = self.engine.calculate(&config.stations, &config.options());
        self.formatter.with_format(format).render(&config.name, &metrics)
    }

    /// 导出指标 JSON
    pub fn export_metrics_json(&self, config: &VsmConfiguration) -> ApiResult<String> {
        let _perf = PerfGuard::new("vsm_export_metrics_json");
        let metrics = self.engine.calculate(&config.stations, &config.options());
        Ok(serde_json::to_string_pretty(&metrics)?)
    }

    /// 解析保存的配置 blob
    pub fn load_configuration(&self, raw: &str) -> ApiResult<VsmConfiguration> {
        let config = VsmConfiguration::from_json(raw)?;
        if config.id.trim().is_empty() {
            return Err(ApiError::InvalidInput("配置ID不能为空".to_string()));
        }
        Ok(config)
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入工位清单
    ///
    /// DQ 告警写入日志, 由调用方决定是否展示报告
    pub fn import_stations<P: AsRef<Path>>(&self, path: P) -> ApiResult<StationImportOutcome> {
        let _perf = PerfGuard::new("vsm_import_stations");
        let outcome = StationImporter::new(*self.engine.policy()).import_file(path)?;

        for v in &outcome.report.violations {
            warn!(
                row = v.row_number,
                station_id = v.station_id.as_deref().unwrap_or("-"),
                level = %v.level,
                field = %v.field,
                "{}",
                v.message
            );
        }

        Ok(outcome)
    }
}
