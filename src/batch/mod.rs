//! # 批量处理模块
//!
//! 提供输入文件收集与并行逐文件处理能力。
//!
//! ## 功能
//! - 按后缀收集匹配文件列表
//! - 有界并行处理
//! - 进度反馈与失败汇总
//!
//! ## 依赖关系
//! - 被 `conversion/` 和 `commands/` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};
