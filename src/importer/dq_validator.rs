// ==========================================
// 制造单元价值流系统 - 数据质量校验器实现
// ==========================================
// 职责: 工位数据 DQ 校验 + 报告
// 红线: 引擎会缺省处理的值只做 WARNING, 不阻断导入
// ==========================================

use crate::config::engine_policy::EnginePolicy;
use crate::domain::import::DqViolation;
use crate::domain::types::DqLevel;
use crate::importer::field_mapper::RawStationRecord;
use crate::importer::station_importer_trait::DqValidator;
use std::collections::HashSet;

pub struct StationDqValidator {
    policy: EnginePolicy,
}

impl StationDqValidator {
    pub fn new(policy: EnginePolicy) -> Self {
        Self { policy }
    }
}

impl Default for StationDqValidator {
    fn default() -> Self {
        Self::new(EnginePolicy::default())
    }
}

fn violation(
    record: &RawStationRecord,
    level: DqLevel,
    field: &str,
    message: String,
) -> DqViolation {
    DqViolation {
        row_number: record.row_number,
        station_id: record.id.clone(),
        level,
        field: field.to_string(),
        message,
    }
}

impl DqValidator for StationDqValidator {
    /// 校验主键 (工位ID 非空且唯一)
    fn validate_primary_key(&self, records: &[RawStationRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();

        for record in records {
            let id = match &record.id {
                Some(id) => id,
                None => {
                    violations.push(violation(
                        record,
                        DqLevel::Info,
                        "id",
                        "工位ID缺失, 已自动生成".to_string(),
                    ));
                    continue;
                }
            };

            if !seen_ids.insert(id.as_str()) {
                violations.push(violation(
                    record,
                    DqLevel::Conflict,
                    "id",
                    format!("重复工位ID: {}", id),
                ));
            }
        }

        violations
    }

    /// 校验数值字段
    fn validate_ranges(&self, record: &RawStationRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        if record.process_step.is_none() {
            violations.push(violation(
                record,
                DqLevel::Info,
                "processStep",
                "工序号缺失, 归入工序 1".to_string(),
            ));
        }

        match record.cycle_time {
            Some(ct) if ct.is_finite() && ct > 0.0 => {}
            Some(ct) => violations.push(violation(
                record,
                DqLevel::Warning,
                "cycleTime",
                format!(
                    "节拍非正数 ({}), 按缺省 {} 秒计算",
                    ct, self.policy.default_cycle_time_sec
                ),
            )),
            None => violations.push(violation(
                record,
                DqLevel::Warning,
                "cycleTime",
                format!("节拍缺失, 按缺省 {} 秒计算", self.policy.default_cycle_time_sec),
            )),
        }

        if let Some(setup) = record.setup_time {
            if !setup.is_finite() || setup < 0.0 {
                violations.push(violation(
                    record,
                    DqLevel::Warning,
                    "setupTime",
                    format!("换型时间无效 ({}), 按 0 计算", setup),
                ));
            }
        }

        if let Some(batch) = record.batch_size {
            if !batch.is_finite() || batch <= 0.0 {
                violations.push(violation(
                    record,
                    DqLevel::Warning,
                    "batchSize",
                    format!("批量非正数 ({}), 按 1 计算", batch),
                ));
            }
        }

        if let Some(uptime) = record.uptime_percent {
            if !uptime.is_finite() || !(0.0..=100.0).contains(&uptime) {
                violations.push(violation(
                    record,
                    DqLevel::Warning,
                    "uptimePercent",
                    format!(
                        "开动率超出 [0, 100] ({}), 将钳位到 [{}, {}]",
                        uptime, self.policy.uptime_min_percent, self.policy.uptime_max_percent
                    ),
                ));
            }
        }

        if let Some(wip) = record.wip_before {
            if !wip.is_finite() || wip < 0.0 {
                violations.push(violation(
                    record,
                    DqLevel::Warning,
                    "wipBefore",
                    format!("在制品无效 ({}), 按 0 计算", wip),
                ));
            }
        }

        violations
    }
}
