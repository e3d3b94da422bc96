// ==========================================
// 制造单元价值流系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 列名匹配: 忽略大小写、空白、下划线、括号与单位符号
// ==========================================

use crate::domain::station::Station;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::station_importer_trait::FieldMapper;
use std::collections::HashMap;

// ==========================================
// RawStationRecord - 映射后的中间结构
// ==========================================
// 说明: 与 Station 的区别在于 ID 可缺失, 并保留原始行号
#[derive(Debug, Clone, PartialEq)]
pub struct RawStationRecord {
    pub row_number: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    pub process_step: Option<i32>,
    pub cycle_time: Option<f64>,
    pub setup_time: Option<f64>,
    pub batch_size: Option<f64>,
    pub uptime_percent: Option<f64>,
    pub wip_before: Option<f64>,
}

impl RawStationRecord {
    /// 由已结构化的工位构造 (JSON 导入路径)
    pub fn from_station(station: Station, row_number: usize) -> Self {
        let id = Some(station.id.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            row_number,
            id,
            name: station.name,
            process_step: station.process_step,
            cycle_time: station.cycle_time,
            setup_time: station.setup_time,
            batch_size: station.batch_size,
            uptime_percent: station.uptime_percent,
            wip_before: station.wip_before,
        }
    }

    /// 转换为工位, ID 缺失时使用给定的生成 ID
    pub fn into_station(self, fallback_id: impl FnOnce() -> String) -> Station {
        Station {
            id: self.id.unwrap_or_else(fallback_id),
            name: self.name,
            process_step: self.process_step,
            cycle_time: self.cycle_time,
            setup_time: self.setup_time,
            batch_size: self.batch_size,
            uptime_percent: self.uptime_percent,
            wip_before: self.wip_before,
        }
    }
}

// ==========================================
// 列名别名 (已归一化)
// ==========================================
const ID_ALIASES: &[&str] = &["id", "stationid", "工位id", "工位编号", "工位"];
const NAME_ALIASES: &[&str] = &["name", "stationname", "名称", "工位名称"];
const STEP_ALIASES: &[&str] = &["processstep", "step", "工序", "工序号"];
const CYCLE_TIME_ALIASES: &[&str] = &[
    "cycletime", "cycletimes", "cycletimesec", "ct", "节拍", "节拍秒", "单件节拍",
];
const SETUP_TIME_ALIASES: &[&str] = &[
    "setuptime", "setuptimes", "setuptimesec", "setup", "换型时间", "换型时间秒",
];
const BATCH_SIZE_ALIASES: &[&str] = &["batchsize", "batch", "批量"];
const UPTIME_ALIASES: &[&str] = &["uptimepercent", "uptime", "开动率"];
const WIP_ALIASES: &[&str] = &["wipbefore", "wip", "在制品", "前置在制品"];

/// 归一化列名: 小写, 只保留字母数字 (含中文)
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

pub struct StationFieldMapper;

impl FieldMapper for StationFieldMapper {
    fn map_to_raw_station(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawStationRecord> {
        let normalized: HashMap<String, &str> = row
            .iter()
            .map(|(k, v)| (normalize_header(k), v.trim()))
            .collect();

        Ok(RawStationRecord {
            row_number,
            id: get_string(&normalized, ID_ALIASES),
            name: get_string(&normalized, NAME_ALIASES),
            process_step: parse_step(&normalized, row_number)?,
            cycle_time: parse_f64(&normalized, CYCLE_TIME_ALIASES, row_number)?,
            setup_time: parse_f64(&normalized, SETUP_TIME_ALIASES, row_number)?,
            batch_size: parse_f64(&normalized, BATCH_SIZE_ALIASES, row_number)?,
            uptime_percent: parse_f64(&normalized, UPTIME_ALIASES, row_number)?,
            wip_before: parse_f64(&normalized, WIP_ALIASES, row_number)?,
        })
    }
}

/// 提取字符串字段 (依次尝试别名, 空值视为缺失)
fn get_string(row: &HashMap<String, &str>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| row.get(*alias))
        .find(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// 解析浮点数, 允许百分号后缀 ("85%")
fn parse_f64(
    row: &HashMap<String, &str>,
    aliases: &[&str],
    row_number: usize,
) -> ImportResult<Option<f64>> {
    match get_string(row, aliases) {
        None => Ok(None),
        Some(value) => value
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: aliases[0].to_string(),
                message: format!("无法解析为浮点数: {}", value),
            }),
    }
}

/// 解析工序号 (Excel 数值单元格可能为 "2.0")
fn parse_step(row: &HashMap<String, &str>, row_number: usize) -> ImportResult<Option<i32>> {
    let value = match get_string(row, STEP_ALIASES) {
        None => return Ok(None),
        Some(v) => v,
    };

    if let Ok(step) = value.parse::<i32>() {
        return Ok(Some(step));
    }

    match value.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
            Ok(Some(f as i32))
        }
        _ => Err(ImportError::TypeConversionError {
            row: row_number,
            field: STEP_ALIASES[0].to_string(),
            message: format!("无法解析为整数工序号: {}", value),
        }),
    }
}
