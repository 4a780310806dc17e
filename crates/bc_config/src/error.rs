// crates/bc_config/src/error.rs

//! 配置层错误类型

use bc_foundation::BcError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] serde_json::Error),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),
}

impl ConfigError {
    /// 无效值
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for BcError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => BcError::io_with_source("读取配置失败", e),
            ConfigError::Parse(e) => BcError::invalid_config("<json>", "", e.to_string()),
            ConfigError::InvalidValue { key, value, reason } => {
                BcError::invalid_config(key, value, reason)
            }
            ConfigError::Missing(key) => BcError::invalid_config(key, "", "缺失"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("time_window", 0, "必须为正");
        assert!(err.to_string().contains("time_window"));
    }

    #[test]
    fn test_into_bc_error() {
        let err: BcError = ConfigError::invalid("future_window", 0, "至少为 1").into();
        assert!(matches!(err, BcError::InvalidConfig { .. }));
    }
}
