//! # 工具函数模块
//!
//! 提供美化输出、进度条、文件大小统计等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `conversion/`, `batch/` 模块使用
//! - 子模块: output, progress, size

pub mod output;
pub mod progress;
pub mod size;
