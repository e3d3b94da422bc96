// ==========================================
// 制造单元价值流系统 - 引擎口径策略
// ==========================================
// 职责: 承载引擎缺省值与开动率钳位区间
// 红线: 钳位下限必须 > 0, 保证近乎停机时节拍仍为有限值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::config_manager::config_keys;
use serde::{Deserialize, Serialize};

/// 缺省单件节拍 (秒)
pub const DEFAULT_CYCLE_TIME_SEC: f64 = 60.0;

/// 开动率钳位下限 (%)
pub const UPTIME_MIN_PERCENT: f64 = 0.01;

/// 开动率钳位上限 (%)
pub const UPTIME_MAX_PERCENT: f64 = 100.0;

/// 引擎口径策略
///
/// 缺省值为业务口径: 节拍缺失按 60 秒, 开动率钳位到 [0.01, 100]。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnginePolicy {
    pub default_cycle_time_sec: f64,
    pub uptime_min_percent: f64,
    pub uptime_max_percent: f64,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            default_cycle_time_sec: DEFAULT_CYCLE_TIME_SEC,
            uptime_min_percent: UPTIME_MIN_PERCENT,
            uptime_max_percent: UPTIME_MAX_PERCENT,
        }
    }
}

impl EnginePolicy {
    /// 校验策略
    ///
    /// # 规则
    /// - default_cycle_time_sec: 正的有限值
    /// - 0 < uptime_min_percent <= uptime_max_percent <= 100
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.default_cycle_time_sec.is_finite() && self.default_cycle_time_sec > 0.0) {
            return Err(invalid(
                config_keys::DEFAULT_CYCLE_TIME_SEC,
                self.default_cycle_time_sec,
                "缺省节拍必须为正数",
            ));
        }

        if !(self.uptime_min_percent.is_finite() && self.uptime_min_percent > 0.0) {
            return Err(invalid(
                config_keys::UPTIME_MIN_PERCENT,
                self.uptime_min_percent,
                "开动率下限必须大于 0",
            ));
        }

        if !(self.uptime_max_percent.is_finite()
            && self.uptime_max_percent >= self.uptime_min_percent
            && self.uptime_max_percent <= 100.0)
        {
            return Err(invalid(
                config_keys::UPTIME_MAX_PERCENT,
                self.uptime_max_percent,
                "开动率上限必须位于 [下限, 100]",
            ));
        }

        Ok(())
    }

    /// 钳位开动率 (缺失/非有限值按 100 处理)
    pub fn clamp_uptime(&self, uptime_percent: Option<f64>) -> f64 {
        uptime_percent
            .filter(|v| v.is_finite())
            .unwrap_or(100.0)
            .clamp(self.uptime_min_percent, self.uptime_max_percent)
    }
}

fn invalid(key: &str, value: f64, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(EnginePolicy::default().validate().is_ok());
    }

    #[test]
    fn test_zero_uptime_floor_rejected() {
        let policy = EnginePolicy {
            uptime_min_percent: 0.0,
            ..EnginePolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_inverted_clamp_rejected() {
        let policy = EnginePolicy {
            uptime_min_percent: 50.0,
            uptime_max_percent: 40.0,
            ..EnginePolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_clamp_uptime() {
        let policy = EnginePolicy::default();
        assert_eq!(policy.clamp_uptime(None), 100.0);
        assert_eq!(policy.clamp_uptime(Some(f64::NAN)), 100.0);
        assert_eq!(policy.clamp_uptime(Some(0.0)), 0.01);
        assert_eq!(policy.clamp_uptime(Some(-20.0)), 0.01);
        assert_eq!(policy.clamp_uptime(Some(150.0)), 100.0);
        assert_eq!(policy.clamp_uptime(Some(85.0)), 85.0);
    }
}
