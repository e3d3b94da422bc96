// ==========================================
// 制造单元价值流系统 - 单件节拍计算器
// ==========================================
// 职责: 单工位节拍归一化
// 输入: Station
// 输出: 单件节拍 / 开动率修正节拍 / 单机产能 (UPH)
// 红线: 无错误分支, 所有输入形态都经缺省规则得到确定输出
// ==========================================

use crate::config::engine_policy::EnginePolicy;
use crate::domain::station::{finite, Station};

/// 每小时秒数
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// ==========================================
// UnitCycleCalculator - 单件节拍计算器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCycleCalculator {
    policy: EnginePolicy,
}

impl UnitCycleCalculator {
    pub fn new(policy: EnginePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// 单件节拍 (秒)
    ///
    /// `有效节拍 + 换型时间 / 批量`
    /// - cycle_time 缺失或 <= 0 时取缺省节拍
    /// - setup_time 缺失或 <= 0 时取 0
    /// - batch_size 缺失或 <= 0 时取 1
    pub fn per_unit_cycle_time(&self, station: &Station) -> f64 {
        let input_ct = finite(station.cycle_time)
            .filter(|v| *v > 0.0)
            .unwrap_or(self.policy.default_cycle_time_sec);
        let setup = finite(station.setup_time)
            .filter(|v| *v > 0.0)
            .unwrap_or(0.0);
        let batch = finite(station.batch_size)
            .filter(|v| *v > 0.0)
            .unwrap_or(1.0);

        input_ct + setup / batch
    }

    /// 开动率修正后的节拍 (秒)
    ///
    /// 开动率钳位到 [下限, 上限], 下限 > 0 保证结果有限
    pub fn effective_cycle_time(&self, station: &Station) -> f64 {
        let uptime = self.policy.clamp_uptime(station.uptime_percent);
        self.per_unit_cycle_time(station) / (uptime / 100.0)
    }

    /// 单机产能 (件/小时)
    ///
    /// 有效节拍 <= 0 或结果溢出 (极小节拍、极大节拍) 时为 0
    pub fn station_throughput_uph(&self, station: &Station) -> f64 {
        let effective_ct = self.effective_cycle_time(station);
        if !(effective_ct > 0.0 && effective_ct.is_finite()) {
            return 0.0;
        }
        let uph = SECONDS_PER_HOUR / effective_ct;
        if uph.is_finite() {
            uph
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> UnitCycleCalculator {
        UnitCycleCalculator::default()
    }

    #[test]
    fn test_missing_cycle_time_uses_default() {
        let calc = calculator();
        assert_eq!(calc.per_unit_cycle_time(&Station::new("S1")), 60.0);
        assert_eq!(
            calc.per_unit_cycle_time(&Station::new("S2").with_cycle_time(0.0)),
            60.0
        );
        assert_eq!(
            calc.per_unit_cycle_time(&Station::new("S3").with_cycle_time(-12.0)),
            60.0
        );
        assert_eq!(
            calc.per_unit_cycle_time(&Station::new("S4").with_cycle_time(f64::NAN)),
            60.0
        );
    }

    #[test]
    fn test_setup_amortized_over_batch() {
        let station = Station::new("S1").with_cycle_time(10.0).with_setup(100.0, 20.0);
        assert_eq!(calculator().per_unit_cycle_time(&station), 15.0);
    }

    #[test]
    fn test_non_positive_batch_treated_as_one() {
        let station = Station::new("S1").with_cycle_time(10.0).with_setup(30.0, 0.0);
        assert_eq!(calculator().per_unit_cycle_time(&station), 40.0);

        let station = Station::new("S2").with_cycle_time(10.0).with_setup(30.0, -4.0);
        assert_eq!(calculator().per_unit_cycle_time(&station), 40.0);
    }

    #[test]
    fn test_negative_setup_ignored() {
        let station = Station::new("S1").with_cycle_time(10.0).with_setup(-30.0, 5.0);
        assert_eq!(calculator().per_unit_cycle_time(&station), 10.0);
    }

    #[test]
    fn test_overflowing_throughput_is_zero() {
        let calc = calculator();
        // 3600 / 1e-310 溢出
        assert_eq!(calc.station_throughput_uph(&Station::new("S1").with_cycle_time(1e-310)), 0.0);

        let station = Station::new("S2").with_cycle_time(1.7e308).with_setup(1.7e308, 1.0);
        assert!(calc.per_unit_cycle_time(&station).is_infinite());
        assert_eq!(calc.station_throughput_uph(&station), 0.0);
    }

    #[test]
    fn test_full_uptime_is_identity() {
        let calc = calculator();
        let station = Station::new("S1").with_cycle_time(37.5).with_uptime(100.0);
        assert_eq!(
            calc.effective_cycle_time(&station),
            calc.per_unit_cycle_time(&station)
        );

        let station = Station::new("S2").with_cycle_time(37.5);
        assert_eq!(
            calc.effective_cycle_time(&station),
            calc.per_unit_cycle_time(&station)
        );
    }

    #[test]
    fn test_zero_uptime_stays_finite() {
        let calc = calculator();
        let station = Station::new("S1").with_cycle_time(60.0).with_uptime(0.0);

        let effective_ct = calc.effective_cycle_time(&station);
        assert!(effective_ct.is_finite());
        assert!((effective_ct - 600_000.0).abs() < 1e-6);
        assert!(calc.station_throughput_uph(&station) > 0.0);
    }

    #[test]
    fn test_setup_batch_and_uptime_combined() {
        let calc = calculator();
        let station = Station::new("S1")
            .with_cycle_time(480.0)
            .with_setup(3600.0, 200.0)
            .with_uptime(50.0);

        assert_eq!(calc.per_unit_cycle_time(&station), 498.0);
        assert_eq!(calc.effective_cycle_time(&station), 996.0);
        assert!((calc.station_throughput_uph(&station) - 3.614).abs() < 1e-3);
    }

    #[test]
    fn test_custom_default_cycle_time() {
        let calc = UnitCycleCalculator::new(EnginePolicy {
            default_cycle_time_sec: 90.0,
            ..EnginePolicy::default()
        });
        assert_eq!(calc.per_unit_cycle_time(&Station::new("S1")), 90.0);
        assert_eq!(calc.station_throughput_uph(&Station::new("S1")), 40.0);
    }
}
