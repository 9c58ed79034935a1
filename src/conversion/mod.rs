//! # 转换流程模块
//!
//! .hsol -> VTKHDF 的完整转换流水线。
//!
//! ## 功能
//! - `horses2plt` 子进程调用（可选超时）
//! - 逐文件 / 批量两种编排模式
//! - 输出文件重命名与放置
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `batch/`, `parsers/`, `vtkhdf/`, `models/`
//! - 子模块: horses2plt, orchestrator, placement

pub mod horses2plt;
pub mod orchestrator;
pub mod placement;

pub use orchestrator::{run, ConversionMode, ConversionReport};
