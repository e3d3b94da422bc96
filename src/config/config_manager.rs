// ==========================================
// 制造单元价值流系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: JSON key-value 文件 + 环境变量覆写
// ==========================================

use crate::config::engine_policy::EnginePolicy;
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::metrics::MetricsOptions;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// 报表小数位缺省值
const DEFAULT_REPORT_DECIMALS: usize = 2;

/// 报表小数位上限
const MAX_REPORT_DECIMALS: usize = 6;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 从 key-value 映射创建
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// 从 JSON 配置文件创建
    ///
    /// 文件格式为扁平对象, 值可为字符串或数字:
    /// `{"vsm.default_cycle_time_sec": 45, "report.decimals": "1"}`
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadError {
            path: path.display().to_string(),
            source,
        })?;

        let object: serde_json::Map<String, Value> = serde_json::from_str(&raw)?;
        let mut values = HashMap::with_capacity(object.len());
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s,
                Value::Null => continue,
                other => other.to_string(),
            };
            values.insert(key, text);
        }

        tracing::debug!(path = %path.display(), keys = values.len(), "配置文件已加载");
        Ok(Self { values })
    }

    /// 加载配置: 文件存在则读取, 然后应用环境变量覆写
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let manager = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            Some(p) => {
                tracing::debug!(path = %p.display(), "配置文件不存在, 使用缺省配置");
                Self::default()
            }
            None => Self::default(),
        };
        Ok(manager.with_env_overrides())
    }

    /// 应用环境变量覆写
    ///
    /// - `CELL_VSM_DEFAULT_CYCLE_TIME_SEC`
    /// - `CELL_VSM_UPTIME_MIN_PERCENT`
    /// - `CELL_VSM_UPTIME_MAX_PERCENT`
    /// - `CELL_VSM_RAW_MATERIAL_UPH`
    pub fn with_env_overrides(mut self) -> Self {
        for (env_key, config_key) in config_keys::ENV_OVERRIDES {
            if let Ok(v) = std::env::var(env_key) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    self.values.insert(config_key.to_string(), trimmed.to_string());
                }
            }
        }
        self
    }

    /// 覆写单个配置值
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn get_f64(&self, key: &str) -> ConfigResult<Option<f64>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(value) => value
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    message: "无法解析为浮点数".to_string(),
                }),
        }
    }

    fn get_f64_or_default(&self, key: &str, default: f64) -> ConfigResult<f64> {
        Ok(self.get_f64(key)?.unwrap_or(default))
    }

    // ===== 引擎口径 =====

    /// 获取引擎口径策略 (已校验)
    pub fn get_engine_policy(&self) -> ConfigResult<EnginePolicy> {
        let defaults = EnginePolicy::default();
        let policy = EnginePolicy {
            default_cycle_time_sec: self.get_f64_or_default(
                config_keys::DEFAULT_CYCLE_TIME_SEC,
                defaults.default_cycle_time_sec,
            )?,
            uptime_min_percent: self
                .get_f64_or_default(config_keys::UPTIME_MIN_PERCENT, defaults.uptime_min_percent)?,
            uptime_max_percent: self
                .get_f64_or_default(config_keys::UPTIME_MAX_PERCENT, defaults.uptime_max_percent)?,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// 获取缺省计算选项 (原料速率)
    ///
    /// 非正数视为未配置
    pub fn get_default_options(&self) -> ConfigResult<MetricsOptions> {
        let raw_material_uph = self
            .get_f64(config_keys::RAW_MATERIAL_UPH)?
            .filter(|v| v.is_finite() && *v > 0.0);
        Ok(MetricsOptions { raw_material_uph })
    }

    // ===== 报表 =====

    /// 获取报表小数位 (缺省 2, 上限 6)
    pub fn get_report_decimals(&self) -> ConfigResult<usize> {
        match self.get_value(config_keys::REPORT_DECIMALS) {
            None => Ok(DEFAULT_REPORT_DECIMALS),
            Some(value) => value
                .parse::<usize>()
                .map(|d| d.min(MAX_REPORT_DECIMALS))
                .map_err(|_| ConfigError::InvalidValue {
                    key: config_keys::REPORT_DECIMALS.to_string(),
                    value: value.to_string(),
                    message: "无法解析为非负整数".to_string(),
                }),
        }
    }

    /// 获取所有配置的快照 (按 key 排序的 JSON)
    ///
    /// 用于导出报表时记录口径
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let sorted: BTreeMap<&String, &String> = self.values.iter().collect();
        Ok(serde_json::to_string(&sorted)?)
    }
}

/// 缺省配置文件路径
///
/// 优先 `CELL_VSM_CONFIG`, 否则为用户配置目录下的 `cell-vsm/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CELL_VSM_CONFIG") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join("cell-vsm").join("config.json"))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 引擎口径
    pub const DEFAULT_CYCLE_TIME_SEC: &str = "vsm.default_cycle_time_sec";
    pub const UPTIME_MIN_PERCENT: &str = "vsm.uptime_min_percent";
    pub const UPTIME_MAX_PERCENT: &str = "vsm.uptime_max_percent";

    // 原料供给
    pub const RAW_MATERIAL_UPH: &str = "vsm.raw_material_uph";

    // 报表
    pub const REPORT_DECIMALS: &str = "report.decimals";

    /// 环境变量 → 配置键
    pub const ENV_OVERRIDES: [(&str, &str); 4] = [
        ("CELL_VSM_DEFAULT_CYCLE_TIME_SEC", DEFAULT_CYCLE_TIME_SEC),
        ("CELL_VSM_UPTIME_MIN_PERCENT", UPTIME_MIN_PERCENT),
        ("CELL_VSM_UPTIME_MAX_PERCENT", UPTIME_MAX_PERCENT),
        ("CELL_VSM_RAW_MATERIAL_UPH", RAW_MATERIAL_UPH),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(pairs: &[(&str, &str)]) -> ConfigManager {
        ConfigManager::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_empty_config_yields_default_policy() {
        let policy = ConfigManager::default().get_engine_policy().unwrap();
        assert_eq!(policy, EnginePolicy::default());
    }

    #[test]
    fn test_policy_override() {
        let cm = manager(&[(config_keys::DEFAULT_CYCLE_TIME_SEC, "45")]);
        let policy = cm.get_engine_policy().unwrap();
        assert_eq!(policy.default_cycle_time_sec, 45.0);
        assert_eq!(policy.uptime_min_percent, 0.01);
    }

    #[test]
    fn test_unparsable_value_is_error() {
        let cm = manager(&[(config_keys::UPTIME_MIN_PERCENT, "abc")]);
        let err = cm.get_engine_policy().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_non_positive_raw_material_ignored() {
        let cm = manager(&[(config_keys::RAW_MATERIAL_UPH, "0")]);
        assert_eq!(cm.get_default_options().unwrap().raw_material_uph, None);

        let cm = manager(&[(config_keys::RAW_MATERIAL_UPH, "40")]);
        assert_eq!(cm.get_default_options().unwrap().raw_material_uph, Some(40.0));
    }

    #[test]
    fn test_report_decimals_capped() {
        let cm = manager(&[(config_keys::REPORT_DECIMALS, "12")]);
        assert_eq!(cm.get_report_decimals().unwrap(), 6);
        assert_eq!(ConfigManager::default().get_report_decimals().unwrap(), 2);
    }

    #[test]
    fn test_config_snapshot_sorted() {
        let cm = manager(&[("b", "2"), ("a", "1")]);
        assert_eq!(cm.get_config_snapshot().unwrap(), r#"{"a":"1","b":"2"}"#);
    }
}
