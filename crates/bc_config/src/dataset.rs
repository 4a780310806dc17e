// crates/bc_config/src/dataset.rs

//! 数据集配置
//!
//! JSON 示例：
//!
//! ```json
//! {
//!   "files": ["runs/Twall-95.h5", "runs/Twall-100.h5"],
//!   "variant": "temp_vel",
//!   "window": { "steady_time": 30, "time_window": 5, "future_window": 5, "push_forward_steps": 2 },
//!   "transform": true,
//!   "use_coords": true,
//!   "seed": 42
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::window::WindowConfig;

/// 样本组装变体（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleVariant {
    /// 仅预测温度，速度视为已知
    TempInput,
    /// 仅预测速度
    VelInput,
    /// 预测速度，附加坐标通道
    VelCoordInput,
    /// 预测速度与相场，附加成核层
    VelDfun,
    /// 同时预测温度与速度，带推进展开
    TempVel,
}

impl SampleVariant {
    /// 全部变体
    pub const ALL: [SampleVariant; 5] = [
        SampleVariant::TempInput,
        SampleVariant::VelInput,
        SampleVariant::VelCoordInput,
        SampleVariant::VelDfun,
        SampleVariant::TempVel,
    ];

    /// 变体名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::TempInput => "temp_input",
            Self::VelInput => "vel_input",
            Self::VelCoordInput => "vel_coord_input",
            Self::VelDfun => "vel_dfun",
            Self::TempVel => "temp_vel",
        }
    }
}

impl fmt::Display for SampleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 数据集配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// 归档路径列表
    pub files: Vec<PathBuf>,

    /// 样本变体
    pub variant: SampleVariant,

    /// 时间窗口
    #[serde(default)]
    pub window: WindowConfig,

    /// 是否启用随机水平翻转
    #[serde(default)]
    pub transform: bool,

    /// 是否包含坐标通道
    #[serde(default)]
    pub use_coords: bool,

    /// 翻转随机数种子，缺省时取系统熵
    #[serde(default)]
    pub seed: Option<u64>,

    /// 固定温度尺度，缺省时由全部归档拟合
    #[serde(default)]
    pub temp_scale: Option<f32>,

    /// 固定速度尺度，缺省时由全部归档拟合
    #[serde(default)]
    pub vel_scale: Option<f32>,
}

impl DatasetConfig {
    /// 创建最小配置
    pub fn new(files: Vec<PathBuf>, variant: SampleVariant, window: WindowConfig) -> Self {
        Self {
            files,
            variant,
            window,
            transform: false,
            use_coords: false,
            seed: None,
            temp_scale: None,
            vel_scale: None,
        }
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存为 JSON 文件
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.files.is_empty() {
            return Err(ConfigError::Missing("files".to_string()));
        }
        self.window.validate()?;
        for (key, scale) in [("temp_scale", self.temp_scale), ("vel_scale", self.vel_scale)] {
            if let Some(v) = scale {
                if !(v.is_finite() && v > 0.0) {
                    return Err(ConfigError::invalid(key, v, "尺度必须为正的有限值"));
                }
            }
        }
        Ok(())
    }
}
