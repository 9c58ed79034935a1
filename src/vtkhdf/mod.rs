//! # VTKHDF 文件模块
//!
//! 读写 horses2plt 生成的 VTKHDF (HDF5) 文件。
//!
//! ## 功能
//! - 写入/读取 `SimulationInfo` 元数据组
//! - 遍历文件内部结构
//!
//! ## 依赖关系
//! - 被 `conversion/` 和 `commands/inspect/` 使用
//! - 使用 `hdf5` crate

pub mod metadata;
pub mod tree;

pub use metadata::{inject_metadata, read_metadata};
pub use tree::{read_tree, render_tree, NodeKind, TreeEntry};
