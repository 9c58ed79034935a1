//! # 解析器模块
//!
//! 从 horses2plt 的控制台输出中提取模拟元数据。
//!
//! ## 依赖关系
//! - 被 `conversion/orchestrator.rs` 使用
//! - 子模块: solver_log

pub mod solver_log;
