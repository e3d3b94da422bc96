// ==========================================
// 制造单元价值流系统 - 配置层
// ==========================================
// 职责: 引擎口径与报表配置, 支持文件 + 环境变量覆写
// ==========================================

pub mod config_manager;
pub mod engine_policy;
pub mod error;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, ConfigManager};
pub use engine_policy::EnginePolicy;
pub use error::{ConfigError, ConfigResult};
