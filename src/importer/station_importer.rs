// ==========================================
// 制造单元价值流系统 - 工位导入器
// ==========================================
// 职责: 整合导入流程, 从文件到工位列表
// 流程: 解析 → 映射 → DQ 校验 → 生成缺失ID
// 红线: 导入结果只是编辑器的初始快照, 不参与任何持久化
// ==========================================

use crate::config::engine_policy::EnginePolicy;
use crate::domain::import::{DqReport, DqSummary, DqViolation};
use crate::domain::station::Station;
use crate::domain::types::DqLevel;
use crate::importer::dq_validator::StationDqValidator;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{RawStationRecord, StationFieldMapper};
use crate::importer::file_parser::{FileFormat, JsonParser, UniversalFileParser};
use crate::importer::station_importer_trait::{DqValidator, FieldMapper, FileParser};
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 表格数据行号偏移 (第 1 行为表头)
const TABULAR_FIRST_DATA_ROW: usize = 2;

// ==========================================
// StationImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct StationImportOutcome {
    pub stations: Vec<Station>,
    pub raw_material_uph: Option<f64>, // JSON 配置中携带的原料速率
    pub report: DqReport,
    pub elapsed: Duration,
}

// ==========================================
// StationImporter - 工位导入器
// ==========================================
pub struct StationImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    dq_validator: Box<dyn DqValidator>,
}

impl Default for StationImporter {
    fn default() -> Self {
        Self::new(EnginePolicy::default())
    }
}

impl StationImporter {
    /// 使用缺省组件创建导入器
    pub fn new(policy: EnginePolicy) -> Self {
        Self::with_components(
            Box::new(UniversalFileParser),
            Box::new(StationFieldMapper),
            Box::new(StationDqValidator::new(policy)),
        )
    }

    pub fn with_components(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        dq_validator: Box<dyn DqValidator>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            dq_validator,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 从文件导入工位 (.csv / .xlsx / .xls / .json)
    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<StationImportOutcome> {
        let path = file_path.as_ref();
        let start = Instant::now();

        let mut outcome = match FileFormat::from_path(path)? {
            FileFormat::Json => {
                let (stations, raw_material_uph) = JsonParser.parse_file(path)?;
                let records = stations
                    .into_iter()
                    .enumerate()
                    .map(|(idx, s)| RawStationRecord::from_station(s, idx + 1))
                    .collect();
                let mut outcome = self.finish(records, Vec::new(), 0);
                outcome.raw_material_uph = raw_material_uph;
                outcome
            }
            FileFormat::Csv | FileFormat::Excel => {
                let rows = self.file_parser.parse_to_raw_records(path)?;
                debug!(rows = rows.len(), "文件解析完成");
                self.import_rows(&rows)
            }
        };

        outcome.elapsed = start.elapsed();
        info!(
            batch_id = %outcome.report.batch_id,
            stations = outcome.stations.len(),
            blocked = outcome.report.summary.blocked,
            warning = outcome.report.summary.warning,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "工位导入完成"
        );
        Ok(outcome)
    }

    /// 从 JSON 文本导入 (工位数组或完整配置)
    pub fn import_json_str(&self, raw: &str) -> ImportResult<StationImportOutcome> {
        let start = Instant::now();
        let (stations, raw_material_uph) = JsonParser.parse_str(raw)?;
        let records = stations
            .into_iter()
            .enumerate()
            .map(|(idx, s)| RawStationRecord::from_station(s, idx + 1))
            .collect();

        let mut outcome = self.finish(records, Vec::new(), 0);
        outcome.raw_material_uph = raw_material_uph;
        outcome.elapsed = start.elapsed();
        Ok(outcome)
    }

    /// 从已解析的行记录导入
    ///
    /// 映射失败的行记为 ERROR 并阻断, 其余行照常导入
    pub fn import_rows(&self, rows: &[HashMap<String, String>]) -> StationImportOutcome {
        let start = Instant::now();
        let mut records = Vec::with_capacity(rows.len());
        let mut violations = Vec::new();
        let mut blocked = 0;

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + TABULAR_FIRST_DATA_ROW;
            match self.field_mapper.map_to_raw_station(row, row_number) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(row = row_number, error = %e, "行映射失败");
                    blocked += 1;
                    violations.push(DqViolation {
                        row_number,
                        station_id: None,
                        level: DqLevel::Error,
                        field: "row".to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let mut outcome = self.finish(records, violations, blocked);
        outcome.elapsed = start.elapsed();
        outcome
    }

    /// DQ 校验 + 生成缺失 ID + 汇总
    fn finish(
        &self,
        records: Vec<RawStationRecord>,
        mut violations: Vec<DqViolation>,
        blocked: usize,
    ) -> StationImportOutcome {
        violations.extend(self.dq_validator.validate_primary_key(&records));
        for record in &records {
            violations.extend(self.dq_validator.validate_ranges(record));
        }
        violations.sort_by_key(|v| v.row_number);

        let stations: Vec<Station> = records
            .into_iter()
            .map(|r| r.into_station(|| Uuid::new_v4().to_string()))
            .collect();

        let summary = DqSummary {
            total_rows: stations.len() + blocked,
            success: stations.len(),
            blocked,
            warning: violations.iter().filter(|v| v.level == DqLevel::Warning).count(),
            conflict: violations.iter().filter(|v| v.level == DqLevel::Conflict).count(),
        };

        StationImportOutcome {
            stations,
            raw_material_uph: None,
            report: DqReport {
                batch_id: Uuid::new_v4().to_string(),
                summary,
                violations,
            },
            elapsed: Duration::ZERO,
        }
    }
}
