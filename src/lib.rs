// ==========================================
// 制造单元价值流系统 - 核心库
// ==========================================
// 计算链: 工位 → 单件节拍 → 工序产能 → 系统指标
// 系统定位: 编辑器 / 导出 / 列表视图共用的纯计算内核
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 指标计算
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎口径
pub mod config;

// 报表层 - 导出格式
pub mod report;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DqLevel, SystemConstraint};

// 领域实体
pub use domain::{
    DqReport, MetricsOptions, MetricsSnapshot, ProcessStep, Station, StepCapacity, SystemMetrics,
    VsmConfiguration,
};

// 引擎
pub use engine::{StepAggregator, SystemMetricsEngine, UnitCycleCalculator, VsmEngine};

// 配置
pub use config::{ConfigManager, EnginePolicy};

// 导入与报表
pub use importer::{StationImportOutcome, StationImporter};
pub use report::{ReportFormat, ReportFormatter};

// API
pub use api::{ApiError, ApiResult, ConfigurationSummary, VsmApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "制造单元价值流系统";
