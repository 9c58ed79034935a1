//! # inspect 子命令 CLI 定义
//!
//! 转换结果的诊断功能：
//! - `tree`: 打印 HDF5 文件的组/数据集结构
//! - `metadata`: 读取 `/VTKHDF/SimulationInfo` 中的 Time/Iteration
//! - `size`: 统计目录中指定扩展名文件的总大小
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect/` 相应模块

use clap::{Args, Subcommand};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// Inspect 主命令
// ─────────────────────────────────────────────────────────────

/// inspect 主命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(subcommand)]
    pub command: InspectCommands,
}

/// inspect 子命令
#[derive(Subcommand, Debug)]
pub enum InspectCommands {
    /// Print the group/dataset hierarchy of an HDF5 file
    Tree(TreeArgs),

    /// Read the Time/Iteration metadata embedded in a converted file
    Metadata(MetadataArgs),

    /// Report the total size of files with a given extension in a directory
    Size(SizeArgs),
}

/// tree 子命令参数
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// HDF5 file to inspect
    pub file: PathBuf,
}

/// metadata 子命令参数
#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Converted .hdf/.h5 files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

// ─────────────────────────────────────────────────────────────
// 磁盘占用统计
// ─────────────────────────────────────────────────────────────

/// size 子命令参数
#[derive(Args, Debug)]
pub struct SizeArgs {
    /// Directory to scan
    pub path: PathBuf,

    /// File extension to count (e.g. ".hdf", ".h5", ".hsol")
    #[arg(short, long, default_value = ".hdf")]
    pub ext: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,
}
