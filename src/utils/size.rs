//! # 文件大小统计
//!
//! 十进制单位：不足 1e9 字节按 MB 显示，否则按 GB 显示，保留两位小数。
//!
//! ## 依赖关系
//! - 被 `commands/inspect/size.rs` 使用

use crate::error::{HandlerError, Result};

use std::fs;
use std::path::PathBuf;

const MB: f64 = 1e6;
const GB: f64 = 1e9;

/// 格式化字节数
pub fn format_size(bytes: u64) -> String {
    let value = bytes as f64;
    if value < GB {
        format!("{:.2} MB", value / MB)
    } else {
        format!("{:.2} GB", value / GB)
    }
}

/// 文件大小总和
pub fn total_size(files: &[PathBuf]) -> Result<u64> {
    files.iter().try_fold(0u64, |acc, path| {
        let meta = fs::metadata(path).map_err(|e| HandlerError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(acc + meta.len())
    })
}
