//! # 转换请求数据模型
//!
//! 描述一次批量转换所需的全部参数：求解器安装路径、输入目录、
//! 输出位置、`horses2plt` 参数以及日志开关。
//!
//! ## 依赖关系
//! - 被 `cli/convert.rs` 构造
//! - 被 `conversion/` 使用

use crate::error::{HandlerError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// `horses2plt` 在求解器安装目录中的相对路径
pub const UTILITY_RELATIVE_PATH: &str = "Solver/bin/horses2plt";

/// 默认输出参数
pub const DEFAULT_OUTPUT_PARAMETERS: &str =
    "--output-mode=FE --output-variables=rho,u,v,w,p,T,Mach --output-type=vtkhdf";

/// 求解器解文件后缀
pub const SOLUTION_SUFFIX: &str = "hsol";

/// 网格文件后缀
pub const MESH_SUFFIX: &str = "hmesh";

/// `horses2plt` 生成文件的后缀
pub const CONVERTED_SUFFIX: &str = "hdf";

/// 最终输出扩展名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputExtension {
    /// `.hdf`（与 horses2plt 原始输出相同）
    Hdf,
    /// `.h5`
    H5,
    /// 同时输出 `.hdf` 与 `.h5`，各放一个子目录
    Both,
}

impl OutputExtension {
    /// 单一扩展名对应的后缀（不含点）；`Both` 返回 None
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            OutputExtension::Hdf => Some("hdf"),
            OutputExtension::H5 => Some("h5"),
            OutputExtension::Both => None,
        }
    }
}

impl std::fmt::Display for OutputExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputExtension::Hdf => write!(f, ".hdf"),
            OutputExtension::H5 => write!(f, ".h5"),
            OutputExtension::Both => write!(f, "both"),
        }
    }
}

impl FromStr for OutputExtension {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            ".hdf" | "hdf" => Ok(OutputExtension::Hdf),
            ".h5" | "h5" => Ok(OutputExtension::H5),
            "both" => Ok(OutputExtension::Both),
            other => Err(HandlerError::Configuration(format!(
                "Unsupported output extension '{}' (expected .h5, .hdf or both)",
                other
            ))),
        }
    }
}

/// 一次批量转换请求
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// HORSES3D 安装目录
    pub solver_path: PathBuf,
    /// .hsol 文件所在目录
    pub solution_dir: PathBuf,
    /// .hmesh 文件所在目录
    pub mesh_dir: PathBuf,
    /// 输出目录（None 时使用 solution_dir）
    pub output_dir: Option<PathBuf>,
    /// horses2plt 参数（None 时使用默认参数）
    pub output_parameters: Option<String>,
    /// 输出扩展名
    pub extension: OutputExtension,
    /// 是否写入 Time/Iteration 元数据（逐文件模式）
    pub write_metadata: bool,
    /// 简要日志
    pub summary_log: bool,
    /// 完整子进程输出
    pub full_log: bool,
    /// 逐文件模式的并行作业数（1 = 顺序执行，0 = 自动）
    pub jobs: usize,
    /// 单次 horses2plt 调用的超时
    pub timeout: Option<Duration>,
}

impl ConversionRequest {
    pub fn new(
        solver_path: impl Into<PathBuf>,
        solution_dir: impl Into<PathBuf>,
        mesh_dir: impl Into<PathBuf>,
    ) -> Self {
        ConversionRequest {
            solver_path: solver_path.into(),
            solution_dir: solution_dir.into(),
            mesh_dir: mesh_dir.into(),
            output_dir: None,
            output_parameters: None,
            extension: OutputExtension::Hdf,
            write_metadata: false,
            summary_log: false,
            full_log: false,
            jobs: 1,
            timeout: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_output_parameters(mut self, params: impl Into<String>) -> Self {
        self.output_parameters = Some(params.into());
        self
    }

    pub fn with_extension(mut self, extension: OutputExtension) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_metadata(mut self, enabled: bool) -> Self {
        self.write_metadata = enabled;
        self
    }

    pub fn with_summary_log(mut self, enabled: bool) -> Self {
        self.summary_log = enabled;
        self
    }

    pub fn with_full_log(mut self, enabled: bool) -> Self {
        self.full_log = enabled;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 实际输出目录
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.solution_dir)
    }

    /// 拆分后的 horses2plt 参数列表
    ///
    /// 空字符串等同于未设置。
    pub fn output_parameters(&self) -> Vec<String> {
        let raw = match self.output_parameters.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => DEFAULT_OUTPUT_PARAMETERS,
        };
        raw.split_whitespace().map(str::to_string).collect()
    }

    /// horses2plt 可执行文件的绝对路径
    pub fn utility_path(&self) -> PathBuf {
        self.solver_path.join(UTILITY_RELATIVE_PATH)
    }

    /// 逐文件模式的实际并行度
    pub fn effective_jobs(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get()
        } else {
            self.jobs
        }
    }

    /// 校验三个输入目录
    pub fn validate(&self) -> Result<()> {
        for (label, dir) in [
            ("Solver path", &self.solver_path),
            ("Solution directory", &self.solution_dir),
            ("Mesh directory", &self.mesh_dir),
        ] {
            if !dir.exists() {
                return Err(HandlerError::Configuration(format!(
                    "{} not found: {}",
                    label,
                    dir.display()
                )));
            }
            if !dir.is_dir() {
                return Err(HandlerError::Configuration(format!(
                    "{} is not a directory: {}",
                    label,
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
