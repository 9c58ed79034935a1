//! # inspect metadata 实现
//!
//! 读取转换结果中 `/VTKHDF/SimulationInfo` 的 Time/Iteration。
//! 单个文件读取失败只给出警告，全部失败时返回错误。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的 MetadataArgs
//! - 使用 `vtkhdf/metadata.rs`

use crate::cli::inspect::MetadataArgs;
use crate::error::{HandlerError, Result};
use crate::utils::output;
use crate::vtkhdf;

use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct MetadataRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Iteration")]
    iteration: i64,
}

/// 执行 metadata 子命令
pub fn execute(args: MetadataArgs) -> Result<()> {
    let mut rows = Vec::with_capacity(args.files.len());
    let mut failures = Vec::new();

    for path in &args.files {
        match vtkhdf::read_metadata(path) {
            Ok(meta) => rows.push(MetadataRow {
                file: path.display().to_string(),
                time: format!("{:.6}", meta.time),
                iteration: meta.iteration,
            }),
            Err(e) => {
                output::print_warning(&e.to_string());
                failures.push(format!("  {}", e));
            }
        }
    }

    if rows.is_empty() {
        return Err(HandlerError::BatchFailed {
            failed: failures.len(),
            total: args.files.len(),
            details: failures,
        });
    }

    output::print_header("Simulation Metadata");
    println!("{}", Table::new(&rows));
    Ok(())
}
