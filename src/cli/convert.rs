//! # convert 子命令 CLI 定义
//!
//! 调用 horses2plt 批量转换 .hsol 文件，并可选写入 Time/Iteration 元数据。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use crate::models::{ConversionRequest, OutputExtension};

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// 输出扩展名
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExtensionArg {
    /// Keep the .hdf extension produced by horses2plt
    #[value(alias = ".hdf")]
    Hdf,
    /// Rename outputs to .h5
    #[value(alias = ".h5")]
    H5,
    /// Write both: <output>/hdf/*.hdf and <output>/h5/*.h5
    Both,
}

impl From<ExtensionArg> for OutputExtension {
    fn from(arg: ExtensionArg) -> Self {
        match arg {
            ExtensionArg::Hdf => OutputExtension::Hdf,
            ExtensionArg::H5 => OutputExtension::H5,
            ExtensionArg::Both => OutputExtension::Both,
        }
    }
}

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// HORSES3D installation directory (horses2plt is expected in Solver/bin/)
    #[arg(long, env = "HORSES_SOLVER_PATH")]
    pub solver: PathBuf,

    /// Directory containing the .hsol solution files
    #[arg(long)]
    pub sol_dir: PathBuf,

    /// Directory containing the .hmesh mesh file
    #[arg(long)]
    pub mesh_dir: PathBuf,

    /// Output directory (defaults to the solution directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Flags passed to horses2plt (defaults to FE/vtkhdf output of rho,u,v,w,p,T,Mach)
    #[arg(long, allow_hyphen_values = true)]
    pub output_params: Option<String>,

    /// Output extension
    #[arg(short, long, value_enum, default_value = "hdf")]
    pub extension: ExtensionArg,

    /// Run horses2plt once per file and write Time/Iteration into /VTKHDF/SimulationInfo
    #[arg(long, default_value_t = false)]
    pub write_metadata: bool,

    /// Print a short summary (file counts, per-file confirmations)
    #[arg(long, default_value_t = false)]
    pub summary_log: bool,

    /// Echo the full horses2plt output
    #[arg(long, default_value_t = false)]
    pub full_log: bool,

    /// Parallel jobs in per-file mode (1 = sequential, 0 = auto)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Per-invocation timeout for horses2plt, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Export per-file Time/Iteration to a CSV file (per-file mode only)
    #[arg(long)]
    pub metadata_csv: Option<PathBuf>,
}

impl ConvertArgs {
    /// 构造转换请求
    pub fn to_request(&self) -> ConversionRequest {
        let mut request = ConversionRequest::new(&self.solver, &self.sol_dir, &self.mesh_dir)
            .with_extension(self.extension.into())
            .with_metadata(self.write_metadata)
            .with_summary_log(self.summary_log)
            .with_full_log(self.full_log)
            .with_jobs(self.jobs)
            .with_timeout(self.timeout.map(Duration::from_secs));

        if let Some(ref dir) = self.output_dir {
            request = request.with_output_dir(dir);
        }
        if let Some(ref params) = self.output_params {
            request = request.with_output_parameters(params.as_str());
        }
        request
    }
}
