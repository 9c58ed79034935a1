//! # horses-data-handler - HORSES3D 解文件后处理工具
//!
//! 把 HORSES3D 求解器输出的 .hsol 检查点批量转换为 VTKHDF (HDF5) 文件，
//! 并可选把每个文件的物理时间与迭代步写入文件内部。
//!
//! ## 子命令
//! - `convert` - 调用 horses2plt 转换，可选写入元数据
//! - `inspect` - 诊断功能
//!   - `tree` - 打印 HDF5 文件结构
//!   - `metadata` - 读取嵌入的 Time/Iteration
//!   - `size` - 统计目录中文件总大小
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── conversion/ (转换流程编排、horses2plt 调用、输出放置)
//!   │     ├── parsers/    (输出文本解析)
//!   │     ├── vtkhdf/     (HDF5 读写)
//!   │     ├── batch/      (文件收集与并行处理)
//!   │     └── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod conversion;
mod error;
mod models;
mod parsers;
mod utils;
mod vtkhdf;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
