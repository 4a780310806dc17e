// crates/bc_dataset/src/concat.rs

//! 多归档拼接数据集
//!
//! 全局索引通过前缀和二分查找映射到 (归档, 局部索引)。

use tracing::info;

use bc_config::{DatasetConfig, SampleVariant};
use bc_foundation::{BcError, BcResult};

use crate::accessor::AccessorOptions;
use crate::assembly::{ChannelLayout, Sample};
use crate::dataset::{BoilingDataset, SampleDataset};
use crate::normalization::{fit_scales, ScaleFit};

/// 拼接若干同布局的单归档数据集
#[derive(Debug)]
pub struct ConcatDataset {
    datasets: Vec<BoilingDataset>,
    /// `cumulative[i]` 为第 i 个归档之前的样本总数，末项为总样本数
    cumulative: Vec<usize>,
    layout: ChannelLayout,
    variant: SampleVariant,
    name: String,
}

impl ConcatDataset {
    /// 拼接已构造的数据集
    ///
    /// # 错误
    ///
    /// 列表为空，或各数据集的变体/通道布局不一致。
    pub fn new(datasets: Vec<BoilingDataset>) -> BcResult<Self> {
        let first = datasets
            .first()
            .ok_or_else(|| BcError::invalid_config("files", "[]", "至少需要一个归档"))?;
        let variant = first.variant();
        let layout = first.layout();

        for ds in &datasets[1..] {
            if ds.variant() != variant || ds.layout() != layout {
                return Err(BcError::invalid_config(
                    "files",
                    ds.name().to_string(),
                    format!(
                        "布局 {:?}/{} 与首个归档 {:?}/{} 不一致",
                        ds.layout(),
                        ds.variant(),
                        layout,
                        variant
                    ),
                ));
            }
        }

        let mut cumulative = vec![0usize; datasets.len() + 1];
        for (i, ds) in datasets.iter().enumerate() {
            cumulative[i + 1] = cumulative[i] + ds.len();
        }

        let name = datasets
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join("+");

        Ok(Self {
            datasets,
            cumulative,
            layout,
            variant,
            name,
        })
    }

    /// 按配置打开全部归档、拟合尺度并拼接
    ///
    /// 第 i 个归档的翻转种子为 `seed + i`。配置中显式给出的尺度优先于拟合值。
    pub fn from_config(config: &DatasetConfig) -> BcResult<Self> {
        config.validate()?;

        let mut datasets = config
            .files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let options = AccessorOptions {
                    window: config.window,
                    transform: config.transform,
                    use_coords: config.use_coords,
                    seed: config.seed.map(|s| s.wrapping_add(i as u64)),
                };
                BoilingDataset::open(path, config.variant, options)
            })
            .collect::<BcResult<Vec<_>>>()?;

        let scales = resolve_scales(&datasets, config)?;
        for ds in &mut datasets {
            scales.apply(ds.accessor_mut());
        }

        let concat = Self::new(datasets)?;
        info!(
            "Concatenated {} archives ({}): {} samples, layout {:?}",
            concat.datasets.len(),
            concat.variant,
            concat.len(),
            concat.layout
        );
        Ok(concat)
    }

    /// 全局索引 → (归档序号, 局部索引)
    pub fn locate(&self, idx: usize) -> Option<(usize, usize)> {
        if idx >= self.len() {
            return None;
        }
        let entry = self
            .cumulative
            .partition_point(|&c| c <= idx)
            .saturating_sub(1);
        Some((entry, idx - self.cumulative[entry]))
    }

    /// 组成数据集
    pub fn datasets(&self) -> &[BoilingDataset] {
        &self.datasets
    }

    /// 样本变体
    pub fn variant(&self) -> SampleVariant {
        self.variant
    }

    /// 当前生效的尺度（取自首个归档）
    pub fn scales(&self) -> ScaleFit {
        self.datasets
            .first()
            .map(|ds| ScaleFit {
                temp_scale: ds.accessor().temperature_scale(),
                vel_scale: ds.accessor().velocity_scale(),
            })
            .unwrap_or_default()
    }
}

fn resolve_scales(datasets: &[BoilingDataset], config: &DatasetConfig) -> BcResult<ScaleFit> {
    if config.temp_scale.is_some() && config.vel_scale.is_some() {
        return Ok(ScaleFit {
            temp_scale: config.temp_scale,
            vel_scale: config.vel_scale,
        });
    }
    let accessors: Vec<_> = datasets.iter().map(|d| d.accessor()).collect();
    Ok(fit_scales(&accessors)?.with_overrides(config.temp_scale, config.vel_scale))
}

impl SampleDataset for ConcatDataset {
    fn len(&self) -> usize {
        self.cumulative.last().copied().unwrap_or(0)
    }

    fn get(&mut self, idx: usize) -> BcResult<Sample> {
        let (entry, local) = self
            .locate(idx)
            .ok_or_else(|| BcError::index_out_of_bounds("sample", idx, self.len()))?;
        self.datasets[entry].get(local)
    }

    fn layout(&self) -> ChannelLayout {
        self.layout
    }

    fn name(&self) -> &str {
        &self.name
    }
}
