// ==========================================
// 制造单元价值流系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv) / JSON (.json)
// ==========================================

use crate::domain::snapshot::VsmConfiguration;
use crate::domain::station::Station;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::station_importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Excel,
    Json,
}

impl FileFormat {
    /// 根据扩展名判定格式 (大小写不敏感)
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" | "xls" => Ok(FileFormat::Excel),
            "json" => Ok(FileFormat::Json),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        ensure_exists(file_path)?;

        let file = File::open(file_path).map_err(|e| ImportError::FileReadError(e.to_string()))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::CsvParseError(e.to_string()))?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| ImportError::CsvParseError(e.to_string()))?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表, 第一行为表头
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        ensure_exists(file_path)?;

        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::EmptyFile(file_path.display().to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 接受两种形态: 工位数组 / 完整 VsmConfiguration
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Stations(Vec<Station>),
    Configuration(VsmConfiguration),
}

pub struct JsonParser;

impl JsonParser {
    /// 解析 JSON 文本
    ///
    /// # 返回
    /// (工位列表, 配置中的原料速率)
    pub fn parse_str(&self, raw: &str) -> ImportResult<(Vec<Station>, Option<f64>)> {
        let document: JsonDocument =
            serde_json::from_str(raw).map_err(|e| ImportError::JsonParseError(e.to_string()))?;

        Ok(match document {
            JsonDocument::Stations(stations) => (stations, None),
            JsonDocument::Configuration(config) => (config.stations, config.raw_material_uph),
        })
    }

    pub fn parse_file(&self, file_path: &Path) -> ImportResult<(Vec<Station>, Option<f64>)> {
        ensure_exists(file_path)?;
        let raw = std::fs::read_to_string(file_path)
            .map_err(|e| ImportError::FileReadError(e.to_string()))?;
        self.parse_str(&raw)
    }
}

// ==========================================
// 通用表格解析器 (根据扩展名自动选择)
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        match FileFormat::from_path(file_path)? {
            FileFormat::Csv => CsvParser.parse_to_raw_records(file_path),
            FileFormat::Excel => ExcelParser.parse_to_raw_records(file_path),
            FileFormat::Json => Err(ImportError::UnsupportedFormat(
                "json (请使用 JsonParser)".to_string(),
            )),
        }
    }
}
