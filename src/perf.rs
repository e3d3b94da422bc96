use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Once;
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(true);
static SLOW_OP_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);
static INIT: Once = Once::new();

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 读取性能日志开关 (进程内只读一次)
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭（可通过环境变量开启）
/// - `CELL_VSM_PERF=1` 强制开启
/// - `CELL_VSM_SLOW_OP_MS=20` 配置慢操作阈值（毫秒），超过时以 warn 级别记录
fn init_from_env() {
    INIT.call_once(|| {
        let enabled = match std::env::var("CELL_VSM_PERF") {
            Ok(v) => is_true(&v),
            Err(_) => cfg!(debug_assertions),
        };
        PERF_ENABLED.store(enabled, Ordering::Relaxed);

        let slow_ms = std::env::var("CELL_VSM_SLOW_OP_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 20 } else { 100 });
        SLOW_OP_THRESHOLD_MS.store(slow_ms, Ordering::Relaxed);
    });
}

/// 性能统计 Guard：记录 elapsed_ms + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let _perf = cell_vsm::perf::PerfGuard::new("vsm_calculate");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        init_from_env();
        let depth = PERF_DEPTH.with(|d| {
            let depth = d.get();
            d.set(depth.saturating_add(1));
            depth
        });
        Self {
            op,
            start: Instant::now(),
            depth,
        }
    }

    pub fn op(&self) -> &'static str {
        self.op
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));

        if !PERF_ENABLED.load(Ordering::Relaxed) {
            return;
        }

        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let threshold = SLOW_OP_THRESHOLD_MS.load(Ordering::Relaxed);
        if threshold > 0 && elapsed_ms >= threshold {
            tracing::warn!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                depth = self.depth,
                "slow op"
            );
        } else {
            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                depth = self.depth,
                "done"
            );
        }
    }
}
