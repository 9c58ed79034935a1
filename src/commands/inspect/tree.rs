//! # inspect tree 实现
//!
//! 打印 HDF5 文件的组/数据集层级，用于确认 horses2plt 输出和元数据组是否齐全。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的 TreeArgs
//! - 使用 `vtkhdf/tree.rs`

use crate::cli::inspect::TreeArgs;
use crate::error::Result;
use crate::utils::output;
use crate::vtkhdf::{self, NodeKind};

/// 执行 tree 子命令
pub fn execute(args: TreeArgs) -> Result<()> {
    let entries = vtkhdf::read_tree(&args.file)?;

    output::print_header(&format!("Structure of '{}'", args.file.display()));
    print!("{}", vtkhdf::render_tree(&entries));

    let groups = entries.iter().filter(|e| e.kind == NodeKind::Group).count();
    output::print_info(&format!(
        "{} group(s), {} dataset(s)",
        groups,
        entries.len() - groups
    ));
    Ok(())
}
