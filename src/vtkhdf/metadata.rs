//! # 模拟元数据写入/读取
//!
//! 在 horses2plt 生成的 VTKHDF 文件中写入 `/VTKHDF/SimulationInfo/{Time, Iteration}`。
//!
//! ## 文件布局
//! ```text
//! /VTKHDF                  (horses2plt 生成)
//!   └── SimulationInfo     (不存在时创建)
//!         ├── Time         f32 标量
//!         └── Iteration    i32 标量
//! ```
//!
//! ## 依赖关系
//! - 被 `conversion/orchestrator.rs`, `commands/inspect/metadata.rs` 使用
//! - 使用 `hdf5` crate

use crate::error::{HandlerError, Result};
use crate::models::SimulationMetadata;
use hdf5::{Group, H5Type};
use std::path::Path;

pub const ROOT_GROUP: &str = "VTKHDF";
pub const INFO_GROUP: &str = "SimulationInfo";
pub const TIME_ENTRY: &str = "Time";
pub const ITERATION_ENTRY: &str = "Iteration";

/// 写入（覆盖）模拟元数据
///
/// 文件句柄只在本函数内持有，任何返回路径上都会释放。
pub fn inject_metadata(path: &Path, metadata: &SimulationMetadata) -> Result<()> {
    let iteration = i32::try_from(metadata.iteration).map_err(|_| HandlerError::Injection {
        path: path.display().to_string(),
        reason: format!(
            "iteration {} does not fit in a 32-bit integer",
            metadata.iteration
        ),
    })?;
    let time = metadata.time as f32;

    let file = hdf5::File::open_rw(path).map_err(|e| injection_error(path, e))?;
    if !file.link_exists(ROOT_GROUP) {
        return Err(HandlerError::Injection {
            path: path.display().to_string(),
            reason: format!("missing root group '/{}'", ROOT_GROUP),
        });
    }

    let root = file.group(ROOT_GROUP).map_err(|e| injection_error(path, e))?;
    let info = if root.link_exists(INFO_GROUP) {
        root.group(INFO_GROUP)
    } else {
        root.create_group(INFO_GROUP)
    }
    .map_err(|e| injection_error(path, e))?;

    replace_scalar(&info, TIME_ENTRY, time).map_err(|e| injection_error(path, e))?;
    replace_scalar(&info, ITERATION_ENTRY, iteration).map_err(|e| injection_error(path, e))?;

    file.flush().map_err(|e| injection_error(path, e))?;
    Ok(())
}

/// 读取已写入的模拟元数据
pub fn read_metadata(path: &Path) -> Result<SimulationMetadata> {
    let inspect_error = |e: hdf5::Error| HandlerError::Inspect {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let file = hdf5::File::open(path).map_err(inspect_error)?;
    let info_path = format!("{}/{}", ROOT_GROUP, INFO_GROUP);
    if !file.link_exists(ROOT_GROUP) || !file.link_exists(&info_path) {
        return Err(HandlerError::Inspect {
            path: path.display().to_string(),
            reason: format!("no '/{}' group", info_path),
        });
    }

    let info = file.group(&info_path).map_err(inspect_error)?;
    let time: f32 = info
        .dataset(TIME_ENTRY)
        .and_then(|d| d.read_scalar())
        .map_err(inspect_error)?;
    let iteration: i32 = info
        .dataset(ITERATION_ENTRY)
        .and_then(|d| d.read_scalar())
        .map_err(inspect_error)?;

    Ok(SimulationMetadata::new(time as f64, iteration as i64))
}

/// 删除同名条目后重新创建标量
///
/// 已存在的条目可能形状或类型不同，不能原地写入。
fn replace_scalar<T: H5Type>(group: &Group, name: &str, value: T) -> hdf5::Result<()> {
    if group.link_exists(name) {
        group.unlink(name)?;
    }
    let dataset = group.new_dataset::<T>().shape(()).create(name)?;
    dataset.write_scalar(&value)
}

fn injection_error(path: &Path, e: hdf5::Error) -> HandlerError {
    HandlerError::Injection {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
