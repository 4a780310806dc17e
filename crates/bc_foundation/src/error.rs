// crates/bc_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `BcError` 枚举和 `BcResult` 类型别名，用于整个项目的错误处理。
//!
//! # 错误分类
//!
//! 1. **构造错误**: 时间窗口非正、文件名后缀无法解析等
//! 2. **前置条件错误**: 未设置归一化尺度即提取温度/速度
//! 3. **范围错误**: 样本索引越界、存储时间步越界、未知物理场
//!
//! 所有错误均为本地、立即失败，不做内部重试。
//!
//! # 示例
//!
//! ```
//! use bc_foundation::error::{BcError, BcResult};
//!
//! fn sample(index: usize, len: usize) -> BcResult<()> {
//!     BcError::check_index("sample", index, len)
//! }
//!
//! assert!(sample(3, 4).is_ok());
//! assert!(sample(4, 4).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type BcResult<T> = Result<T, BcError>;

/// BoilCast 错误类型
#[derive(Error, Debug)]
pub enum BcError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 不支持的文件格式
    #[error("不支持的文件格式: {format} (支持的格式: {supported:?})")]
    UnsupportedFormat {
        /// 输入文件格式
        format: String,
        /// 支持的格式列表
        supported: Vec<String>,
    },

    /// 存储后端错误
    #[error("存储后端错误 [{backend}]: {message}")]
    Backend {
        /// 后端名称
        backend: &'static str,
        /// 错误信息
        message: String,
    },

    /// 功能未编译进当前构建
    #[error("功能不可用: {feature} (需要启用 cargo feature `{feature}`)")]
    NotAvailable {
        /// feature 名称
        feature: &'static str,
    },

    // ========================================================================
    // 范围错误
    // ========================================================================

    /// 物理场不存在
    #[error("物理场不存在: {field}")]
    FieldNotFound {
        /// 场名称
        field: String,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 数组形状不匹配
    #[error("数组形状不匹配: {name} 期望 {expected:?}, 实际 {actual:?}")]
    ShapeMismatch {
        /// 数据名称
        name: String,
        /// 期望形状
        expected: Vec<usize>,
        /// 实际形状
        actual: Vec<usize>,
    },

    // ========================================================================
    // 配置与前置条件错误
    // ========================================================================

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 归一化尺度未设置
    #[error("{field} 尺度未设置: 提取前必须先调用 set_{field}_scale")]
    ScaleNotSet {
        /// 对应物理量 (temperature / velocity)
        field: &'static str,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl BcError {
    /// 从IO错误创建
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 从IO错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 不支持的格式
    pub fn unsupported_format(format: impl Into<String>, supported: Vec<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            supported,
        }
    }

    /// 存储后端错误
    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            message: message.into(),
        }
    }

    /// 物理场不存在
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 形状不匹配
    pub fn shape_mismatch(name: impl Into<String>, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            name: name.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 尺度未设置
    pub fn scale_not_set(field: &'static str) -> Self {
        Self::ScaleNotSet { field }
    }

    /// 是否为范围类错误
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. } | Self::FieldNotFound { .. }
        )
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl BcError {
    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> BcResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }

    /// 检查形状是否一致
    #[inline]
    pub fn check_shape(name: &str, expected: &[usize], actual: &[usize]) -> BcResult<()> {
        if expected != actual {
            Err(Self::shape_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for BcError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<ndarray::ShapeError> for BcError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Backend {
            backend: "ndarray",
            message: err.to_string(),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_bounds() {
        let err = BcError::index_out_of_bounds("sample", 10, 5);
        let msg = err.to_string();
        assert!(msg.contains("sample"));
        assert!(msg.contains("10"));
        assert!(msg.contains("5"));
        assert!(err.is_range_error());
    }

    #[test]
    fn test_check_index() {
        assert!(BcError::check_index("timestep", 9, 10).is_ok());
        assert!(BcError::check_index("timestep", 10, 10).is_err());
    }

    #[test]
    fn test_check_shape() {
        assert!(BcError::check_shape("frame", &[4, 5], &[4, 5]).is_ok());
        let err = BcError::check_shape("frame", &[4, 5], &[5, 4]).unwrap_err();
        assert!(matches!(err, BcError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_scale_not_set_display() {
        let err = BcError::scale_not_set("temperature");
        assert!(err.to_string().contains("set_temperature_scale"));
        assert!(!err.is_range_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: BcError = io_err.into();
        assert!(matches!(err, BcError::Io { .. }));
    }
}
