// ==========================================
// 制造单元价值流系统 - 工序聚合器
// ==========================================
// 职责: 按 process_step 分组, 合并为工序产能
// 输入: 工位集合 (顺序无关)
// 输出: 按工序号升序的 StepCapacity 列表
// 红线: 同工序工位为并联机台, 产能相加 (两台 60 UPH → 120 UPH)
// 红线: 利用率/等待时间不在此计算 (相对系统约束)
// ==========================================

use crate::domain::process_step::StepCapacity;
use crate::domain::station::Station;
use crate::engine::unit_cycle::{UnitCycleCalculator, SECONDS_PER_HOUR};
use std::collections::BTreeMap;

// ==========================================
// StepAggregator - 工序聚合器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct StepAggregator {
    calculator: UnitCycleCalculator,
}

/// 单工序累加器 (一次遍历完成所有求和)
#[derive(Default)]
struct StepAccumulator {
    station_ids: Vec<String>,
    station_names: Vec<String>,
    sum_station_ct: f64,
    combined_rate_uph: f64,
    wip_before: f64,
}

impl StepAggregator {
    pub fn new(calculator: UnitCycleCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &UnitCycleCalculator {
        &self.calculator
    }

    /// 聚合工位为工序
    ///
    /// 每个工位只归属一个工序; 工序内求和顺序为输入顺序,
    /// 保证同一输入重复计算结果逐位一致。
    pub fn aggregate(&self, stations: &[Station]) -> Vec<StepCapacity> {
        let mut grouped: BTreeMap<i32, StepAccumulator> = BTreeMap::new();

        for station in stations {
            let acc = grouped.entry(station.step_key()).or_default();
            acc.station_ids.push(station.id.clone());
            acc.station_names.push(station.display_name().to_string());
            acc.sum_station_ct += self.calculator.per_unit_cycle_time(station);
            acc.combined_rate_uph += self.calculator.station_throughput_uph(station);
            acc.wip_before += station.wip_units();
        }

        grouped
            .into_iter()
            .map(|(step, acc)| Self::finish_step(step, acc))
            .collect()
    }

    fn finish_step(step: i32, acc: StepAccumulator) -> StepCapacity {
        let machine_count = acc.station_ids.len();
        // 并联求和溢出时按零产能处理
        let combined_rate_uph = if acc.combined_rate_uph.is_finite() {
            acc.combined_rate_uph
        } else {
            0.0
        };
        let effective_ct_sec = if combined_rate_uph > 0.0 {
            SECONDS_PER_HOUR / combined_rate_uph
        } else {
            f64::INFINITY
        };

        StepCapacity {
            step,
            machine_count,
            avg_station_ct_sec: acc.sum_station_ct / machine_count as f64,
            combined_rate_uph,
            effective_ct_sec,
            per_machine_avg_uph: combined_rate_uph / machine_count as f64,
            wip_before: acc.wip_before,
            station_ids: acc.station_ids,
            station_names: acc.station_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_machines_add_capacity() {
        let stations = vec![
            Station::new("M1").with_step(1).with_cycle_time(60.0),
            Station::new("M2").with_step(1).with_cycle_time(60.0),
        ];
        let steps = StepAggregator::default().aggregate(&stations);

        assert_eq!(steps.len(), 1);
        let step = &steps[0];
        assert_eq!(step.machine_count, 2);
        assert_eq!(step.combined_rate_uph, 120.0);
        assert_eq!(step.effective_ct_sec, 30.0);
        assert_eq!(step.per_machine_avg_uph, 60.0);
        assert_eq!(step.avg_station_ct_sec, 60.0);
    }

    #[test]
    fn test_steps_sorted_and_missing_step_defaults_to_one() {
        let stations = vec![
            Station::new("C").with_step(3),
            Station::new("A"),
            Station::new("B").with_step(2),
            Station::new("A2").with_step(1),
        ];
        let steps = StepAggregator::default().aggregate(&stations);

        let keys: Vec<i32> = steps.iter().map(|s| s.step).collect();
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(steps[0].station_ids, vec!["A".to_string(), "A2".to_string()]);
    }

    #[test]
    fn test_station_names_follow_ids() {
        let stations = vec![
            Station::new("M1").with_name("冲压A").with_step(1),
            Station::new("M2").with_step(1),
        ];
        let steps = StepAggregator::default().aggregate(&stations);

        assert_eq!(steps[0].station_names, vec!["冲压A".to_string(), "M2".to_string()]);
        assert_eq!(steps[0].station_names.len(), steps[0].station_ids.len());
    }

    #[test]
    fn test_avg_station_ct_is_mean_not_capacity() {
        let stations = vec![
            Station::new("M1").with_step(1).with_cycle_time(30.0),
            Station::new("M2").with_step(1).with_cycle_time(90.0),
        ];
        let steps = StepAggregator::default().aggregate(&stations);
        let step = &steps[0];

        assert_eq!(step.avg_station_ct_sec, 60.0);
        // 120 + 40
        assert_eq!(step.combined_rate_uph, 160.0);
        assert_eq!(step.effective_ct_sec, 22.5);
    }

    #[test]
    fn test_wip_summed_per_step() {
        let stations = vec![
            Station::new("M1").with_step(1).with_wip_before(4.0),
            Station::new("M2").with_step(1).with_wip_before(6.0),
            Station::new("M3").with_step(2),
        ];
        let steps = StepAggregator::default().aggregate(&stations);

        assert_eq!(steps[0].wip_before, 10.0);
        assert_eq!(steps[1].wip_before, 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(StepAggregator::default().aggregate(&[]).is_empty());
    }
}
