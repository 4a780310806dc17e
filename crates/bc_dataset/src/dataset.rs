// crates/bc_dataset/src/dataset.rs

//! 数据集协议与单归档数据集

use std::path::Path;

use tracing::debug;

use bc_config::SampleVariant;
use bc_foundation::{BcError, BcResult};

use crate::accessor::{AccessorOptions, WindowedAccessor};
use crate::assembly::{self, ChannelLayout, Sample};
use crate::nucleation::NucleationDeriver;

/// 可按索引取样的数据集
///
/// `get` 需要 `&mut self`：翻转增强会推进数据集自身的随机数源。
/// 并行加载时每个工作线程持有独立实例。
pub trait SampleDataset {
    /// 样本数
    fn len(&self) -> usize;

    /// 取第 `idx` 个样本
    ///
    /// `idx >= len()` 时返回 [`BcError::IndexOutOfBounds`]，不会读取归档。
    fn get(&mut self, idx: usize) -> BcResult<Sample>;

    /// 通道布局
    fn layout(&self) -> ChannelLayout;

    /// 数据集名称
    fn name(&self) -> &str;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 单个归档上的数据集
#[derive(Debug)]
pub struct BoilingDataset {
    accessor: WindowedAccessor,
    variant: SampleVariant,
    deriver: NucleationDeriver,
}

impl BoilingDataset {
    /// 由访问器与变体构造
    pub fn new(accessor: WindowedAccessor, variant: SampleVariant) -> Self {
        Self {
            accessor,
            variant,
            deriver: NucleationDeriver::default(),
        }
    }

    /// 按路径打开
    pub fn open(path: &Path, variant: SampleVariant, options: AccessorOptions) -> BcResult<Self> {
        Ok(Self::new(WindowedAccessor::open(path, options)?, variant))
    }

    /// 替换成核几何
    pub fn with_deriver(mut self, deriver: NucleationDeriver) -> Self {
        self.deriver = deriver;
        self
    }

    /// 样本变体
    pub fn variant(&self) -> SampleVariant {
        self.variant
    }

    /// 底层访问器
    pub fn accessor(&self) -> &WindowedAccessor {
        &self.accessor
    }

    /// 底层访问器（可变），用于设置尺度
    pub fn accessor_mut(&mut self) -> &mut WindowedAccessor {
        &mut self.accessor
    }
}

impl SampleDataset for BoilingDataset {
    fn len(&self) -> usize {
        self.accessor.len()
    }

    fn get(&mut self, idx: usize) -> BcResult<Sample> {
        BcError::check_index("sample", idx, self.len())?;
        let sample = assembly::assemble(&mut self.accessor, self.variant, &self.deriver, idx)?;
        debug!(
            "{}[{}] {}: {:?}",
            self.accessor.name(),
            idx,
            self.variant,
            sample.shapes()
        );
        Ok(sample)
    }

    fn layout(&self) -> ChannelLayout {
        ChannelLayout::for_variant(
            self.variant,
            self.accessor.window(),
            self.accessor.use_coords(),
        )
    }

    fn name(&self) -> &str {
        self.accessor.name()
    }
}
