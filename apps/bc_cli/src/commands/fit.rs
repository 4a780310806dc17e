// apps/bc_cli/src/commands/fit.rs

//! 尺度拟合命令

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use bc_config::DatasetConfig;
use bc_dataset::{fit_scales, AccessorOptions, WindowedAccessor};

/// 尺度拟合参数
#[derive(Args)]
pub struct FitArgs {
    /// 数据集配置文件 (JSON)
    pub config: PathBuf,
}

/// 执行拟合命令，结果以 JSON 打印到标准输出
pub fn execute(args: FitArgs) -> Result<()> {
    let config = DatasetConfig::from_file(&args.config)
        .with_context(|| format!("无法加载配置 {}", args.config.display()))?;
    info!("拟合 {} 个归档的尺度", config.files.len());

    let accessors = config
        .files
        .iter()
        .map(|path| {
            WindowedAccessor::open(path, AccessorOptions::new(config.window))
                .with_context(|| format!("无法打开归档 {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let refs: Vec<&WindowedAccessor> = accessors.iter().collect();
    let fit = fit_scales(&refs)?;

    println!("{}", serde_json::to_string_pretty(&fit)?);
    Ok(())
}
