// ==========================================
// 价值流引擎集成测试
// ==========================================
// 测试目标: 工位 → 单件节拍 → 工序产能 → 系统指标 全链路
// ==========================================


use cell_vsm::{
    EnginePolicy, MetricsOptions, Station, SystemConstraint, UnitCycleCalculator, VsmEngine,
};
use test_helpers::{assert_close, mixed_line, two_step_line};

// ==========================================
// 典型场景
// ==========================================

#[test]
fn test_two_step_line_bottleneck() {
    cell_vsm::logging::init_test();
    println!("\n=== 测试：两工序线体瓶颈识别 ===");

    let metrics = VsmEngine::new().calculate(&two_step_line(), &MetricsOptions::default());

    assert_eq!(metrics.steps.len(), 2);
    assert_close(metrics.steps[0].combined_rate_uph, 120.0, "工序1产能");
    assert_close(metrics.steps[1].combined_rate_uph, 60.0, "工序2产能");
    assert_close(metrics.steps[0].effective_ct_sec, 30.0, "工序1有效节拍");
    assert_close(metrics.steps[1].effective_ct_sec, 60.0, "工序2有效节拍");

    assert_close(metrics.system_throughput_uph, 60.0, "系统产出");
    assert_eq!(metrics.bottleneck_step, Some(2), "瓶颈应为工序2");
    assert!(metrics.steps[1].is_bottleneck);
    assert!(!metrics.steps[0].is_bottleneck);
    assert_eq!(metrics.bottleneck().map(|s| s.step), Some(2));
    assert_eq!(metrics.station_count(), 2);

    assert_close(metrics.steps[0].waiting_time_sec, 30.0, "工序1等待");
    assert_close(metrics.steps[1].waiting_time_sec, 0.0, "工序2等待");
    assert_close(metrics.value_add_time_sec, 90.0, "增值时间");
    assert_close(metrics.total_waiting_time_sec, 30.0, "等待时间");
    assert_close(metrics.total_lead_time_sec, 120.0, "交付周期");
    assert_close(metrics.process_efficiency_percent, 75.0, "流程效率");

    println!("✓ 系统产出 {:.2} UPH, 瓶颈工序 {:?}", metrics.system_throughput_uph, metrics.bottleneck_step);
}

#[test]
fn test_raw_material_becomes_constraint() {
    println!("\n=== 测试：原料供给成为约束 ===");

    let metrics = VsmEngine::new().calculate(
        &two_step_line(),
        &MetricsOptions::with_raw_material_uph(40.0),
    );

    assert_close(metrics.system_throughput_uph, 40.0, "系统产出");
    assert!(metrics.is_raw_material_bottleneck, "应标记原料瓶颈");
    assert_eq!(metrics.bottleneck_step, None, "原料约束时不应有瓶颈工序");
    assert!(metrics.steps.iter().all(|s| !s.is_bottleneck));
    assert_eq!(metrics.constraint(), SystemConstraint::RawMaterial);
    assert_close(metrics.system_ct_sec, 90.0, "系统节拍");
}

#[test]
fn test_setup_and_uptime_single_station() {
    println!("\n=== 测试：换型分摊 + 开动率 ===");

    let station = Station::new("M1")
        .with_cycle_time(480.0)
        .with_setup(3600.0, 200.0)
        .with_uptime(50.0);
    let calc = UnitCycleCalculator::default();

    assert_close(calc.per_unit_cycle_time(&station), 498.0, "单件节拍");
    assert_close(calc.effective_cycle_time(&station), 996.0, "有效节拍");
    assert!((calc.station_throughput_uph(&station) - 3.614).abs() < 1e-3);

    let metrics = VsmEngine::new().calculate(&[station], &MetricsOptions::default());
    assert_eq!(metrics.steps.len(), 1);
    assert_eq!(metrics.steps[0].step, 1, "缺省工序号为1");
    assert_close(metrics.system_ct_sec, 996.0, "系统节拍");
}

// ==========================================
// 性质
// ==========================================

#[test]
fn test_missing_or_non_positive_cycle_time_defaults_to_60() {
    let calc = UnitCycleCalculator::default();
    for station in [
        Station::new("A"),
        Station::new("B").with_cycle_time(0.0),
        Station::new("C").with_cycle_time(-5.0),
        Station::new("D").with_cycle_time(f64::NAN),
    ] {
        assert_close(calc.per_unit_cycle_time(&station), 60.0, &station.id);
    }
}

#[test]
fn test_full_uptime_effective_ct_is_exact() {
    let calc = UnitCycleCalculator::default();
    let station = Station::new("A").with_cycle_time(37.3).with_setup(120.0, 7.0).with_uptime(100.0);
    assert_eq!(
        calc.effective_cycle_time(&station),
        calc.per_unit_cycle_time(&station),
        "开动率100%时有效节拍应与单件节拍完全相等"
    );
}

#[test]
fn test_identical_parallel_machines() {
    let stations = vec![
        Station::new("A").with_step(1).with_cycle_time(60.0),
        Station::new("B").with_step(1).with_cycle_time(60.0),
    ];
    let metrics = VsmEngine::new().calculate(&stations, &MetricsOptions::default());

    assert_eq!(metrics.steps[0].machine_count, 2);
    assert_close(metrics.steps[0].combined_rate_uph, 120.0, "合计产能");
    assert_close(metrics.steps[0].effective_ct_sec, 30.0, "有效节拍");
    assert_close(metrics.steps[0].per_machine_avg_uph, 60.0, "单机平均");
    assert_close(metrics.steps[0].avg_station_ct_sec, 60.0, "节拍均值");
}

#[test]
fn test_throughput_never_exceeds_slowest_step() {
    let engine = VsmEngine::new();
    for raw in [None, Some(10.0), Some(92.0), Some(500.0), Some(-1.0)] {
        let metrics = engine.calculate(
            &mixed_line(),
            &MetricsOptions {
                raw_material_uph: raw,
            },
        );
        let min_rate = metrics
            .steps
            .iter()
            .map(|s| s.combined_rate_uph)
            .fold(f64::INFINITY, f64::min);

        assert!(
            metrics.system_throughput_uph <= min_rate + 1e-9,
            "原料={:?} 时系统产出超过最慢工序",
            raw
        );

        match raw {
            Some(r) if r > 0.0 && r < min_rate => {
                assert_close(metrics.system_throughput_uph, r, "原料约束产出");
                assert!(metrics.is_raw_material_bottleneck);
                assert_eq!(metrics.bottleneck_step, None);
            }
            _ => {
                assert!(!metrics.is_raw_material_bottleneck);
                assert_eq!(metrics.bottleneck_step, Some(3), "喷涂工序应为瓶颈");
            }
        }
    }
}

#[test]
fn test_total_wip_independent_of_ordering() {
    let engine = VsmEngine::new();
    let forward = mixed_line();
    let mut reversed = mixed_line();
    reversed.reverse();

    let a = engine.calculate(&forward, &MetricsOptions::default());
    let b = engine.calculate(&reversed, &MetricsOptions::default());

    assert_close(a.total_wip, 20.5, "在制品合计");
    assert_close(b.total_wip, a.total_wip, "逆序在制品合计");

    let steps_a: Vec<i32> = a.steps.iter().map(|s| s.step).collect();
    let steps_b: Vec<i32> = b.steps.iter().map(|s| s.step).collect();
    assert_eq!(steps_a, vec![1, 2, 3], "工序应按升序输出");
    assert_eq!(steps_a, steps_b);
    for (x, y) in a.steps.iter().zip(&b.steps) {
        assert_close(x.combined_rate_uph, y.combined_rate_uph, "工序产能");
        assert_close(x.wip_before, y.wip_before, "工序在制品");
    }
}

#[test]
fn test_idempotent_and_input_untouched() {
    let engine = VsmEngine::new();
    let stations = mixed_line();
    let before = stations.clone();
    let options = MetricsOptions::with_raw_material_uph(50.0);

    let first = engine.calculate(&stations, &options);
    let second = engine.calculate(&stations, &options);

    assert_eq!(first, second, "两次计算结果应完全一致");
    assert_eq!(stations, before, "输入不应被修改");
}

// ==========================================
// 退化输入
// ==========================================

#[test]
fn test_empty_input_yields_zeroed_metrics() {
    let metrics = VsmEngine::new().calculate(&[], &MetricsOptions::with_raw_material_uph(40.0));

    assert!(metrics.is_empty());
    assert_eq!(metrics.system_throughput_uph, 0.0);
    assert_eq!(metrics.system_ct_sec, 0.0);
    assert_eq!(metrics.process_efficiency_percent, 0.0);
    assert_eq!(metrics.bottleneck_step, None);
    assert!(!metrics.is_raw_material_bottleneck);
}

#[test]
fn test_custom_policy_default_cycle_time() {
    let policy = EnginePolicy {
        default_cycle_time_sec: 45.0,
        ..EnginePolicy::default()
    };
    let metrics = VsmEngine::with_policy(policy)
        .calculate(&[Station::new("A")], &MetricsOptions::default());
    assert_close(metrics.system_throughput_uph, 80.0, "缺省节拍45秒的产出");
}
