// apps/bc_cli/src/commands/mod.rs

//! 子命令实现

pub mod fit;
pub mod info;
pub mod sample;
