//! # 统一错误处理模块
//!
//! 定义 horses-data-handler 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 统一错误类型
#[derive(Error, Debug)]
pub enum HandlerError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 请求配置错误（在启动任何子进程之前检测）
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ─────────────────────────────────────────────────────────────
    // 元数据提取错误
    // ─────────────────────────────────────────────────────────────
    #[error("Cannot extract '{field}': the utility produced no output")]
    EmptyOutput { field: &'static str },

    #[error("Field '{field}' not found in utility output: {excerpt:?}")]
    FieldNotFound {
        field: &'static str,
        excerpt: String,
    },

    #[error("Field '{field}' has unparsable value '{value}': {reason}")]
    FieldParse {
        field: &'static str,
        value: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // HDF5 文件错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to inject metadata into {path}\nReason: {reason}")]
    Injection { path: String, reason: String },

    #[error("Failed to inspect {path}\nReason: {reason}")]
    Inspect { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 输出放置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to place output file {path}\nReason: {reason}")]
    Placement { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' could not be started: {source}")]
    CommandNotFound {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("External command '{command}' timed out after {:.2} s", .limit.as_secs_f64())]
    CommandTimeout { command: String, limit: Duration },

    // ─────────────────────────────────────────────────────────────
    // 批处理错误
    // ─────────────────────────────────────────────────────────────
    #[error("{}: {source}", .file.display())]
    FileFailed {
        file: PathBuf,
        #[source]
        source: Box<HandlerError>,
    },

    #[error("{failed} of {total} file(s) failed:\n{}", .details.join("\n"))]
    BatchFailed {
        failed: usize,
        total: usize,
        details: Vec<String>,
    },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl HandlerError {
    /// 将错误归属到某个输入文件
    pub fn for_file(self, file: impl Into<PathBuf>) -> Self {
        HandlerError::FileFailed {
            file: file.into(),
            source: Box::new(self),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, HandlerError>;
