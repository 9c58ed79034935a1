//! # HDF5 结构遍历
//!
//! 列出文件中所有组与数据集的名称、形状和元素类型，按嵌套深度缩进。
//!
//! ## 依赖关系
//! - 被 `commands/inspect/tree.rs` 使用
//! - 使用 `hdf5` crate

use crate::error::{HandlerError, Result};
use hdf5::Group;
use std::path::Path;

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Dataset,
}

/// 结构树中的一个节点
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEntry {
    /// 嵌套深度（根组的直接成员为 0）
    pub depth: usize,
    pub name: String,
    pub kind: NodeKind,
    /// 数据集形状（标量为空，组为空）
    pub shape: Vec<usize>,
    /// 元素类型描述（组为空字符串）
    pub dtype: String,
}

/// 读取文件的完整结构
pub fn read_tree(path: &Path) -> Result<Vec<TreeEntry>> {
    let file = hdf5::File::open(path).map_err(|e| HandlerError::Inspect {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut entries = Vec::new();
    walk(&file, 0, &mut entries).map_err(|e| HandlerError::Inspect {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(entries)
}

/// 递归遍历：先组后数据集，同类按名称排序
fn walk(group: &Group, depth: usize, entries: &mut Vec<TreeEntry>) -> hdf5::Result<()> {
    let mut groups = group.groups()?;
    groups.sort_by_key(|g| g.name());
    let mut datasets = group.datasets()?;
    datasets.sort_by_key(|d| d.name());

    for sub in &groups {
        entries.push(TreeEntry {
            depth,
            name: leaf_name(&sub.name()),
            kind: NodeKind::Group,
            shape: Vec::new(),
            dtype: String::new(),
        });
        walk(sub, depth + 1, entries)?;
    }

    for dataset in &datasets {
        let dtype = dataset.dtype()?.to_descriptor()?;
        entries.push(TreeEntry {
            depth,
            name: leaf_name(&dataset.name()),
            kind: NodeKind::Dataset,
            shape: dataset.shape(),
            dtype: dtype.to_string(),
        });
    }

    Ok(())
}

fn leaf_name(full: &str) -> String {
    full.rsplit('/').next().unwrap_or(full).to_string()
}

/// 渲染为缩进文本
pub fn render_tree(entries: &[TreeEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let indent = "  ".repeat(entry.depth);
        match entry.kind {
            NodeKind::Group => out.push_str(&format!("{}{}/\n", indent, entry.name)),
            NodeKind::Dataset => out.push_str(&format!(
                "{}{}  shape={:?}  dtype={}\n",
                indent, entry.name, entry.shape, entry.dtype
            )),
        }
    }
    out
}
