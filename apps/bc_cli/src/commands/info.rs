// apps/bc_cli/src/commands/info.rs

//! 归档信息命令
//!
//! 打印原始长度、单帧形状、壁面温度、成核点数量与两项绝对值最大值。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use bc_config::WindowConfig;
use bc_dataset::{AccessorOptions, WindowedAccessor};
use bc_foundation::Field;

/// 归档信息参数
#[derive(Args)]
pub struct InfoArgs {
    /// 归档路径（NPY 目录或 .nc/.h5 文件）
    pub archive: PathBuf,

    /// 跳过的初始瞬态时间步数
    #[arg(long, default_value = "0")]
    pub steady_time: usize,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== BoilCast 归档信息 ===");

    let window = WindowConfig {
        steady_time: args.steady_time,
        ..WindowConfig::default()
    };
    let accessor = WindowedAccessor::open(&args.archive, AccessorOptions::new(window))
        .with_context(|| format!("无法打开归档 {}", args.archive.display()))?;

    let params = accessor.params();
    println!("归档: {}", accessor.name());
    println!("原始时间步数: {}", accessor.raw_len());
    println!("单帧形状: {:?}", accessor.datum_shape()?);
    println!("壁面温度: {}", params.wall_temperature);
    println!(
        "壁面温度标识: {}",
        params.twall_id.as_deref().unwrap_or("-")
    );
    println!("成核点数量: {}", params.nucleation_sites);

    if accessor.has_field(Field::Temperature) {
        println!("max |T · wall_temp|: {}", accessor.abs_max_temperature()?);
    }
    if accessor.has_field(Field::VelX) && accessor.has_field(Field::VelY) {
        println!("max(|u|, |v|): {}", accessor.abs_max_velocity()?);
    }
    if accessor.has_field(Field::Y) {
        println!("dy: {}", accessor.grid_spacing_y()?);
    }

    Ok(())
}
