//! # 数据模型模块
//!
//! 定义转换请求、模拟元数据和单文件转换结果。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `vtkhdf/`, `conversion/` 和 `commands/` 使用
//! - 子模块: request, outcome

pub mod outcome;
pub mod request;

pub use outcome::{ConversionOutcome, MetadataRecord, SimulationMetadata};
pub use request::{ConversionRequest, OutputExtension};
