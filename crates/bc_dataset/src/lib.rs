// crates/bc_dataset/src/lib.rs

//! BoilCast 窗口化样本组装
//!
//! 在只读时间序列归档之上，按统一的时间窗口方案组装多通道输入/标签对，
//! 用于训练沸腾模拟的序列到序列预测模型。
//!
//! # 模块
//!
//! - [`accessor`]: 窗口化/归一化核心 `WindowedAccessor`
//! - [`augment`]: 同步随机水平翻转
//! - [`nucleation`]: 成核层推导
//! - [`assembly`]: 五种样本组装策略
//! - [`dataset`]: 单归档数据集 `BoilingDataset`
//! - [`concat`]: 多归档拼接数据集
//! - [`normalization`]: 跨归档尺度拟合
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use bc_dataset::{ConcatDataset, SampleDataset};
//! use bc_config::DatasetConfig;
//!
//! let config = DatasetConfig::from_file(Path::new("dataset.json"))?;
//! let mut dataset = ConcatDataset::from_config(&config)?;
//! for i in 0..dataset.len() {
//!     let sample = dataset.get(i)?;
//!     let tensors = sample.into_tensors();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accessor;
pub mod assembly;
pub mod augment;
pub mod concat;
pub mod dataset;
pub mod normalization;
pub mod nucleation;

// 重导出常用类型
pub use accessor::{AccessorOptions, WindowedAccessor};
pub use assembly::{ChannelLayout, Sample};
pub use augment::FlipAugmenter;
pub use concat::ConcatDataset;
pub use dataset::{BoilingDataset, SampleDataset};
pub use normalization::{fit_scales, ScaleFit};
pub use nucleation::{HeaterSeeding, NucleationDeriver, NucleationGeometry};
