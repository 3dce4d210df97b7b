// ==========================================
// 个人排班日历 - API层错误类型
// ==========================================
// 职责: 汇总各层错误, 作为对外入口的统一错误
// 说明: 核心层几乎所有输入都在本地恢复, 真正外抛的只有
//       日期键格式错误、配置错误、快照解析错误
// ==========================================

use crate::config::ConfigError;
use crate::domain::date_key::DateKeyError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("日期键无效: {0}")]
    MalformedDateKey(#[from] DateKeyError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("快照序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
