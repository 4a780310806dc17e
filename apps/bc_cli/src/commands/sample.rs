// apps/bc_cli/src/commands/sample.rs

//! 单样本组装命令

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use bc_config::DatasetConfig;
use bc_dataset::{ConcatDataset, SampleDataset};

/// 单样本参数
#[derive(Args)]
pub struct SampleArgs {
    /// 数据集配置文件 (JSON)
    pub config: PathBuf,

    /// 全局样本索引
    pub index: usize,
}

/// 执行样本命令
pub fn execute(args: SampleArgs) -> Result<()> {
    let config = DatasetConfig::from_file(&args.config)
        .with_context(|| format!("无法加载配置 {}", args.config.display()))?;
    let mut dataset = ConcatDataset::from_config(&config).context("构建数据集失败")?;

    let layout = dataset.layout();
    info!(
        "{}: {} 个样本, 输入通道 {}, 输出通道 {}",
        dataset.name(),
        dataset.len(),
        layout.in_channels,
        layout.out_channels
    );

    let (archive, local) = dataset
        .locate(args.index)
        .with_context(|| format!("索引 {} 超出范围 [0, {})", args.index, dataset.len()))?;
    let sample = dataset.get(args.index)?;
    info!(
        "样本 {} (归档 {} 局部索引 {}), 变体 {}",
        args.index,
        archive,
        local,
        sample.variant()
    );
    for (i, tensor) in sample.tensors().iter().enumerate() {
        info!("  张量 {}: {:?}", i, tensor.shape());
    }

    Ok(())
}
