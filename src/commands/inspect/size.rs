//! # inspect size 实现
//!
//! 统计目录中指定扩展名文件的数量与总大小。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的 SizeArgs
//! - 使用 `batch/collector.rs` 收集文件
//! - 使用 `utils/size.rs` 格式化

use crate::batch::FileCollector;
use crate::cli::inspect::SizeArgs;
use crate::error::Result;
use crate::utils::output;
use crate::utils::size::{format_size, total_size};

/// 执行 size 子命令
pub fn execute(args: SizeArgs) -> Result<()> {
    let files = FileCollector::new(&args.path)
        .with_suffix(&args.ext)
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No *{} files found in '{}'",
            display_ext(&args.ext),
            args.path.display()
        ));
        return Ok(());
    }

    let bytes = total_size(&files)?;
    output::print_success(&format!(
        "{} file(s) with extension {} in '{}': {}",
        files.len(),
        display_ext(&args.ext),
        args.path.display(),
        format_size(bytes)
    ));
    Ok(())
}

/// `hdf` -> `.hdf`
fn display_ext(ext: &str) -> String {
    format!(".{}", ext.trim_start_matches('.'))
}
