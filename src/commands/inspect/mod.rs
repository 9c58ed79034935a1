//! # inspect 命令实现
//!
//! 转换结果的诊断入口：
//! - `tree`: 打印文件结构
//! - `metadata`: 读取嵌入的模拟元数据
//! - `size`: 统计磁盘占用
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 子模块: tree, metadata, size

pub mod metadata;
pub mod size;
pub mod tree;

use crate::cli::inspect::{InspectArgs, InspectCommands};
use crate::error::Result;

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    match args.command {
        InspectCommands::Tree(tree_args) => tree::execute(tree_args),
        InspectCommands::Metadata(metadata_args) => metadata::execute(metadata_args),
        InspectCommands::Size(size_args) => size::execute(size_args),
    }
}
