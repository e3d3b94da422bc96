// ==========================================
// 制造单元价值流系统 - API层错误类型
// ==========================================
// 职责: 汇总下层错误, 转换为用户可读的错误消息
// 红线: 引擎本身不报错, 错误只来自导入/配置/序列化
// ==========================================

use crate::config::error::ConfigError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("序列化失败: {0}")]
    SerializationError(#[from] serde_json::Error),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
