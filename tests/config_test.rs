// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 配置文件读取 + 引擎口径生效
// ==========================================


use cell_vsm::config::{config_keys, ConfigError, ConfigManager};
use cell_vsm::{Station, VsmApi};
use std::collections::HashMap;
use test_helpers::{assert_close, write_temp_file};

#[test]
fn test_load_config_file() {
    let file = write_temp_file(
        ".json",
        r#"{
            "vsm.default_cycle_time_sec": 45,
            "vsm.uptime_min_percent": "5",
            "vsm.raw_material_uph": 40.5,
            "report.decimals": 1
        }"#,
    )
    .expect("创建临时文件失败");

    let config = ConfigManager::from_file(file.path()).expect("配置文件应可读取");

    let policy = config.get_engine_policy().expect("口径应有效");
    assert_close(policy.default_cycle_time_sec, 45.0, "缺省节拍");
    assert_close(policy.uptime_min_percent, 5.0, "开动率下限");
    assert_close(policy.uptime_max_percent, 100.0, "开动率上限 (缺省)");

    let options = config.get_default_options().expect("选项应有效");
    assert_eq!(options.raw_material_uph, Some(40.5));
    assert_eq!(config.get_report_decimals().expect("小数位应有效"), 1);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = ConfigManager::from_map(HashMap::new());
    let policy = config.get_engine_policy().expect("缺省口径应有效");

    assert_close(policy.default_cycle_time_sec, 60.0, "缺省节拍");
    assert_close(policy.uptime_min_percent, 0.01, "开动率下限");
    assert_eq!(config.get_default_options().expect("选项").raw_material_uph, None);
    assert_eq!(config.get_report_decimals().expect("小数位"), 2);
}

#[test]
fn test_invalid_values_rejected() {
    let mut config = ConfigManager::default();
    config.set_value(config_keys::UPTIME_MIN_PERCENT, "0");
    let err = config.get_engine_policy().unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidValue { ref key, .. } if key == config_keys::UPTIME_MIN_PERCENT),
        "实际错误: {}",
        err
    );

    let mut config = ConfigManager::default();
    config.set_value(config_keys::DEFAULT_CYCLE_TIME_SEC, "fast");
    assert!(config.get_engine_policy().is_err());

    let mut config = ConfigManager::default();
    config.set_value(config_keys::REPORT_DECIMALS, "-1");
    assert!(config.get_report_decimals().is_err());
}

#[test]
fn test_non_positive_raw_material_treated_as_unset() {
    let mut config = ConfigManager::default();
    config.set_value(config_keys::RAW_MATERIAL_UPH, "0");
    assert_eq!(config.get_default_options().expect("选项").raw_material_uph, None);
}

#[test]
fn test_policy_flows_into_api() {
    let mut config = ConfigManager::default();
    config.set_value(config_keys::UPTIME_MAX_PERCENT, "80");
    let api = VsmApi::from_config(&config).expect("API 应可构造");

    // 开动率缺失按 100 处理, 再钳位到上限 80
    let metrics = api.calculate(
        &[Station::new("A").with_cycle_time(36.0)],
        &Default::default(),
    );
    assert_close(metrics.system_throughput_uph, 80.0, "钳位后的产出");
}

#[test]
fn test_config_snapshot_is_sorted_json() {
    let mut config = ConfigManager::default();
    config.set_value("b.key", "2");
    config.set_value("a.key", "1");
    let snapshot = config.get_config_snapshot().expect("快照");
    assert_eq!(snapshot, r#"{"a.key":"1","b.key":"2"}"#);
}
