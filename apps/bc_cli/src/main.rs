// apps/bc_cli/src/main.rs

//! BoilCast 命令行界面
//!
//! 检查沸腾模拟归档、拟合归一化尺度、导出单个样本的张量形状。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**，只通过 `DatasetConfig`
//! 与 `SampleDataset` 接触下层。

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// BoilCast 窗口化样本工具
#[derive(Parser)]
#[command(name = "bc_cli")]
#[command(author = "BoilCast Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "BoilCast windowed sample assembly tools", long_about = None)]
struct Cli {
    /// 日志级别
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

/// `--log-level` 的取值，未知名称由 clap 直接拒绝
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 显示归档信息
    Info(commands::info::InfoArgs),
    /// 拟合归一化尺度
    Fit(commands::fit::FitArgs),
    /// 组装单个样本
    Sample(commands::sample::SampleArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(Level::from(cli.log_level))
            .with_target(false)
            .finish(),
    )?;

    match cli.command {
        Commands::Info(args) => commands::info::execute(args),
        Commands::Fit(args) => commands::fit::execute(args),
        Commands::Sample(args) => commands::sample::execute(args),
    }
}
