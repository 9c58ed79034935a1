//! # 文件收集器
//!
//! 按后缀模式收集目录中的输入文件（.hsol / .hmesh / .hdf）。
//!
//! ## 功能
//! - glob 模式匹配（逗号分隔多模式）
//! - 可选递归目录搜索
//! - 结果按路径排序，保证多次运行顺序一致
//!
//! ## 依赖关系
//! - 被 `conversion/orchestrator.rs`, `commands/inspect/size.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{HandlerError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            patterns: vec!["*".to_string()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.patterns.is_empty() {
            self.patterns = vec!["*".to_string()];
        }
        self
    }

    /// 按后缀匹配（`hsol` -> `*.hsol`）
    pub fn with_suffix(self, suffix: &str) -> Self {
        let pattern = format!("*.{}", suffix.trim_start_matches('.'));
        self.with_pattern(&pattern)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.input.is_dir() {
            return Err(HandlerError::Configuration(format!(
                "Not a directory: {}",
                self.input.display()
            )));
        }

        let patterns = self
            .patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    HandlerError::Configuration(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| matches_any(&patterns, e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }
}

/// 检查文件名是否匹配任一模式
fn matches_any(patterns: &[Pattern], path: &Path) -> bool {
    let filename = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };

    patterns.iter().any(|p| p.matches(filename))
}
