//! # 转换结果数据模型
//!
//! 存储单个 .hsol 文件的转换输出及其模拟元数据。
//!
//! ## 依赖关系
//! - 被 `parsers/solver_log.rs`, `vtkhdf/metadata.rs` 使用
//! - 被 `conversion/orchestrator.rs`, `commands/convert.rs` 使用

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 模拟元数据：物理时间与迭代步
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetadata {
    pub time: f64,
    pub iteration: i64,
}

impl SimulationMetadata {
    pub fn new(time: f64, iteration: i64) -> Self {
        SimulationMetadata { time, iteration }
    }
}

/// 单个解文件的转换结果
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// 输入 .hsol 文件
    pub solution_file: PathBuf,
    /// horses2plt 生成的 .hdf 文件（位于解文件目录）
    pub converted_file: PathBuf,
    /// 捕获的子进程输出
    pub raw_output: String,
    /// 元数据（仅逐文件模式）
    pub metadata: Option<SimulationMetadata>,
}

impl ConversionOutcome {
    /// 解文件名（不含目录）
    pub fn file_name(&self) -> String {
        self.solution_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// 元数据导出 CSV 的一行
#[derive(Debug, Clone, Serialize)]
pub struct MetadataRecord {
    pub file: String,
    pub time: f64,
    pub iteration: i64,
}

impl MetadataRecord {
    pub fn from_outcome(outcome: &ConversionOutcome) -> Option<Self> {
        outcome.metadata.map(|m| MetadataRecord {
            file: outcome.file_name(),
            time: m.time,
            iteration: m.iteration,
        })
    }
}
