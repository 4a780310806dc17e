// crates/bc_config/src/lib.rs

//! BoilCast Config Layer
//!
//! 配置层，在边界处一次性确定所有不可变参数，核心层不再解析字符串。
//!
//! # 模块概览
//!
//! - [`window`]: 时间窗口配置与有效样本数公式
//! - [`params`]: 由文件名解析的模拟参数（壁面温度、成核点数量）
//! - [`dataset`]: 样本变体与数据集 JSON 配置
//! - [`error`]: 配置错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod error;
pub mod params;
pub mod window;

// 重导出核心类型
pub use dataset::{DatasetConfig, SampleVariant};
pub use error::ConfigError;
pub use params::{nucleation_site_count, SimulationParams, NUCLEATION_SITES, TWALL_MARKER};
pub use window::WindowConfig;
