//! # 输出文件放置
//!
//! 转换完成后，把解文件目录中的 `<stem>.hdf` 移动到输出目录，
//! 按请求的扩展名重命名。
//!
//! ## 规则
//! - `.hdf` / `.h5`：移动到 `<output>/<stem>.<ext>`
//! - `both`：复制到 `<output>/hdf/<stem>.hdf`，再移动到 `<output>/h5/<stem>.h5`；
//!   原文件只发生一次物理移动
//!
//! ## 依赖关系
//! - 被 `conversion/orchestrator.rs` 调用
//! - 使用 `models/request.rs`

use crate::error::{HandlerError, Result};
use crate::models::OutputExtension;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// `both` 模式下的子目录名
pub const HDF_SUBDIR: &str = "hdf";
pub const H5_SUBDIR: &str = "h5";

/// 放置所有转换结果，返回最终文件路径
pub fn place_outputs(
    converted: &[PathBuf],
    output_dir: &Path,
    extension: OutputExtension,
) -> Result<Vec<PathBuf>> {
    let mut placed = Vec::with_capacity(converted.len() * 2);

    match extension.suffix() {
        Some(suffix) => {
            ensure_dir(output_dir)?;
            for source in converted {
                let target = output_dir.join(renamed(source, suffix)?);
                move_file(source, &target)?;
                placed.push(target);
            }
        }
        None => {
            let hdf_dir = output_dir.join(HDF_SUBDIR);
            let h5_dir = output_dir.join(H5_SUBDIR);
            ensure_dir(&hdf_dir)?;
            ensure_dir(&h5_dir)?;

            for source in converted {
                let copy_target = hdf_dir.join(renamed(source, "hdf")?);
                copy_file(source, &copy_target)?;
                placed.push(copy_target);

                let move_target = h5_dir.join(renamed(source, "h5")?);
                move_file(source, &move_target)?;
                placed.push(move_target);
            }
        }
    }

    Ok(placed)
}

/// `<stem>.<suffix>`
fn renamed(source: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = source.file_stem().ok_or_else(|| HandlerError::Placement {
        path: source.display().to_string(),
        reason: "file has no name".to_string(),
    })?;
    Ok(PathBuf::from(stem).with_extension(suffix))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| placement_error(dir, e))
}

/// 移动文件；跨文件系统时退化为复制后删除
fn move_file(source: &Path, target: &Path) -> Result<()> {
    if source == target {
        return if source.is_file() {
            Ok(())
        } else {
            Err(vanished(source))
        };
    }

    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound && !source.exists() => Err(vanished(source)),
        Err(_) => {
            copy_file(source, target)?;
            fs::remove_file(source).map_err(|e| placement_error(source, e))
        }
    }
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    match fs::copy(source, target) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound && !source.exists() => Err(vanished(source)),
        Err(e) => Err(placement_error(source, e)),
    }
}

fn vanished(source: &Path) -> HandlerError {
    HandlerError::Placement {
        path: source.display().to_string(),
        reason: "source file no longer exists".to_string(),
    }
}

fn placement_error(source: &Path, e: std::io::Error) -> HandlerError {
    HandlerError::Placement {
        path: source.display().to_string(),
        reason: e.to_string(),
    }
}
