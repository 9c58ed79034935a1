//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `convert`: .hsol -> VTKHDF 转换（可选写入模拟元数据）
//! - `inspect`: 诊断功能（嵌套子命令）
//!   - `tree`: 打印 HDF5 文件内部结构
//!   - `metadata`: 读取 SimulationInfo 元数据
//!   - `size`: 统计目录中某类文件的总大小
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert, inspect

pub mod convert;
pub mod inspect;

use clap::{Parser, Subcommand};

/// horses-data-handler - HORSES3D 解文件后处理工具
#[derive(Parser)]
#[command(name = "horses-data-handler")]
#[command(version)]
#[command(
    about = "Convert HORSES3D .hsol checkpoints to VTKHDF files and embed simulation metadata",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert .hsol solution files to .hdf/.h5 with horses2plt
    Convert(convert::ConvertArgs),

    /// Inspect converted files (structure, metadata, disk usage)
    Inspect(inspect::InspectArgs),
}
