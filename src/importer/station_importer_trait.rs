// ==========================================
// 制造单元价值流系统 - 工位导入接口定义
// ==========================================
// 流程: 解析 → 映射 → DQ 校验
// ==========================================

use crate::domain::import::DqViolation;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::RawStationRecord;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口 (阶段 0)
// 实现者: CsvParser / ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录 (HashMap<列名, 值>)
    ///
    /// # 返回
    /// - Ok: 行记录列表 (已跳过完全空白的行)
    /// - Err: 文件不存在、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口 (阶段 1)
// 实现者: StationFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 RawStationRecord
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 行号 (用于 DQ 报告)
    fn map_to_raw_station(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawStationRecord>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 数据质量校验接口 (阶段 2)
// 实现者: StationDqValidator
pub trait DqValidator: Send + Sync {
    /// 校验主键 (工位ID 非空且唯一)
    fn validate_primary_key(&self, records: &[RawStationRecord]) -> Vec<DqViolation>;

    /// 校验数值字段 (标记引擎将使用缺省值的字段)
    fn validate_ranges(&self, record: &RawStationRecord) -> Vec<DqViolation>;
}
