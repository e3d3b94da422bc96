// ==========================================
// 制造单元价值流系统 - 导入层
// ==========================================
// 职责: 外部工位清单导入, 生成编辑器初始快照
// 支持: Excel, CSV, JSON
// ==========================================

// 模块声明
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod station_importer;
pub mod station_importer_trait;

// 重导出核心类型
pub use dq_validator::StationDqValidator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{RawStationRecord, StationFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, FileFormat, JsonParser, UniversalFileParser};
pub use station_importer::{StationImportOutcome, StationImporter};

// 重导出 Trait 接口
pub use station_importer_trait::{DqValidator, FieldMapper, FileParser};
