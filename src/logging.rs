// ==========================================
// 日志系统初始化
// ==========================================
// 输出到 stderr, stdout 只留给报表
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 缺省过滤器: 本 crate info, perf 目标 warn (只留慢操作)
const DEFAULT_FILTER: &str = "info,perf=warn";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（缺省: `info,perf=warn`）
///   例如: RUST_LOG=debug 或 RUST_LOG=cell_vsm=trace,perf=info
/// - CELL_VSM_LOG_FORMAT=json: 输出 JSON 行, 便于采集
///
/// # 示例
/// ```no_run
/// use cell_vsm::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var("CELL_VSM_LOG_FORMAT")
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    // 重复初始化时忽略
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// 初始化测试环境的日志系统
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
