//! # 转换流程编排
//!
//! 驱动一次完整的 .hsol -> VTKHDF 转换：
//! 前置检查 -> horses2plt 调用 -> (可选) 元数据提取与写入 -> 输出放置。
//!
//! ## 执行模式
//! - 逐文件模式（写入元数据）：每个 .hsol 单独调用一次 horses2plt，
//!   解析输出后立即写入对应 .hdf；默认顺序执行，首个失败即中止，
//!   已转换的文件保留在磁盘上
//! - 并行逐文件模式（`jobs > 1`）：所有文件都会尝试，失败汇总为 `BatchFailed`
//! - 批量模式（不写元数据）：所有 .hsol 一次调用 horses2plt
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `batch/`, `parsers/solver_log.rs`, `vtkhdf/`
//! - 使用 `conversion/horses2plt.rs`, `conversion/placement.rs`

use super::horses2plt::Horses2Plt;
use super::placement::place_outputs;
use crate::batch::{BatchRunner, FileCollector};
use crate::error::{HandlerError, Result};
use crate::models::request::{CONVERTED_SUFFIX, MESH_SUFFIX, SOLUTION_SUFFIX};
use crate::models::{ConversionOutcome, ConversionRequest};
use crate::parsers::solver_log;
use crate::utils::output::RunLog;
use crate::utils::progress;
use crate::vtkhdf;

use std::fs;
use std::path::{Path, PathBuf};

/// 执行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    PerFile,
    Batch,
}

impl std::fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionMode::PerFile => write!(f, "per-file"),
            ConversionMode::Batch => write!(f, "batch"),
        }
    }
}

/// 前置检查通过后的批次
#[derive(Debug)]
pub struct PreparedBatch {
    pub utility: Horses2Plt,
    pub solutions: Vec<PathBuf>,
    pub mesh: PathBuf,
}

/// 一次转换的结果
#[derive(Debug)]
pub struct ConversionReport {
    pub mode: ConversionMode,
    pub outcomes: Vec<ConversionOutcome>,
    /// 放置后的最终文件
    pub placed: Vec<PathBuf>,
}

/// 执行完整转换流程
pub fn run(request: &ConversionRequest) -> Result<ConversionReport> {
    let log = RunLog::new(request.summary_log, request.full_log);
    let batch = prepare(request, log)?;

    let (mode, outcomes) = if request.write_metadata {
        (ConversionMode::PerFile, run_per_file(request, &batch, log)?)
    } else {
        (ConversionMode::Batch, run_batch(&batch, log)?)
    };

    let converted: Vec<PathBuf> = outcomes.iter().map(|o| o.converted_file.clone()).collect();
    let placed = place_outputs(&converted, request.output_dir(), request.extension)?;

    log.success(&format!(
        "Placed {} file(s) in '{}'",
        placed.len(),
        request.output_dir().display()
    ));

    Ok(ConversionReport {
        mode,
        outcomes,
        placed,
    })
}

/// 前置检查：任何子进程启动之前完成
pub fn prepare(request: &ConversionRequest, log: RunLog) -> Result<PreparedBatch> {
    request.validate()?;

    let utility_path = request.utility_path();
    if !utility_path.is_file() {
        return Err(HandlerError::Configuration(format!(
            "The horses2plt utility is not found at {}",
            utility_path.display()
        )));
    }

    let solutions = FileCollector::new(&request.solution_dir)
        .with_suffix(SOLUTION_SUFFIX)
        .collect()?;
    if solutions.is_empty() {
        return Err(HandlerError::Configuration(format!(
            "No .{} found in {}",
            SOLUTION_SUFFIX,
            request.solution_dir.display()
        )));
    }

    let meshes = FileCollector::new(&request.mesh_dir)
        .with_suffix(MESH_SUFFIX)
        .collect()?;
    let mesh = match meshes.first() {
        Some(m) => m.clone(),
        None => {
            return Err(HandlerError::Configuration(format!(
                "No .{} found in {}",
                MESH_SUFFIX,
                request.mesh_dir.display()
            )))
        }
    };

    log.info(&format!("Nº of .{} files: {}", SOLUTION_SUFFIX, solutions.len()));
    log.info(&format!("Nº of .{} files: {}", MESH_SUFFIX, meshes.len()));
    if meshes.len() > 1 {
        log.warning(&format!(
            "{} mesh files found, using '{}'",
            meshes.len(),
            mesh.display()
        ));
    }

    let output_dir = request.output_dir();
    fs::create_dir_all(output_dir).map_err(|e| HandlerError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let utility =
        Horses2Plt::new(utility_path, request.output_parameters()).with_timeout(request.timeout);
    log.info(&format!("Using {}", utility.binary().display()));

    Ok(PreparedBatch {
        utility,
        solutions,
        mesh,
    })
}

/// horses2plt 为某个解文件生成的 .hdf 路径
pub fn converted_path(solution: &Path) -> PathBuf {
    solution.with_extension(CONVERTED_SUFFIX)
}

/// 逐文件模式
fn run_per_file(
    request: &ConversionRequest,
    batch: &PreparedBatch,
    log: RunLog,
) -> Result<Vec<ConversionOutcome>> {
    let jobs = request.effective_jobs();
    if jobs > 1 {
        log.info(&format!("Running per-file conversion with {} jobs", jobs));
        return BatchRunner::new(jobs)
            .run(&batch.solutions, |solution| convert_with_metadata(batch, solution, log))?
            .into_result();
    }

    let pb = progress::create_progress_bar(batch.solutions.len() as u64, "Converting");
    let log = log.with_progress(&pb);
    let mut outcomes = Vec::with_capacity(batch.solutions.len());

    for solution in &batch.solutions {
        match convert_with_metadata(batch, solution, log) {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.for_file(solution.clone()));
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(outcomes)
}

/// 单个文件：转换 -> 解析 -> 写入
fn convert_with_metadata(
    batch: &PreparedBatch,
    solution: &Path,
    log: RunLog,
) -> Result<ConversionOutcome> {
    let captured = batch
        .utility
        .run(std::slice::from_ref(&solution.to_path_buf()), &batch.mesh)?;
    let text = captured.text();
    log.subprocess(&format!("horses2plt: {}", solution.display()), text);

    let metadata = solver_log::extract_metadata(Some(text))?;
    let converted_file = converted_path(solution);
    vtkhdf::inject_metadata(&converted_file, &metadata)?;

    log.converted(
        &solution.display().to_string(),
        &format!(
            "{} (Time = {}, Iteration = {})",
            converted_file.display(),
            metadata.time,
            metadata.iteration
        ),
    );

    Ok(ConversionOutcome {
        solution_file: solution.to_path_buf(),
        converted_file,
        raw_output: text.to_string(),
        metadata: Some(metadata),
    })
}

/// 批量模式：一次调用处理全部文件
///
/// 合并输出无法归属到单个文件，因此每个结果都保存同一份文本。
fn run_batch(batch: &PreparedBatch, log: RunLog) -> Result<Vec<ConversionOutcome>> {
    let spinner = progress::create_spinner(&format!(
        "Converting {} file(s) with a single horses2plt call",
        batch.solutions.len()
    ));
    let result = batch.utility.run(&batch.solutions, &batch.mesh);
    spinner.finish_and_clear();
    let captured = result?;
    let text = captured.text();
    log.subprocess("horses2plt", text);

    let outcomes: Vec<ConversionOutcome> = batch
        .solutions
        .iter()
        .map(|solution| ConversionOutcome {
            solution_file: solution.clone(),
            converted_file: converted_path(solution),
            raw_output: text.to_string(),
            metadata: None,
        })
        .collect();

    for outcome in &outcomes {
        log.converted(
            &outcome.solution_file.display().to_string(),
            &outcome.converted_file.display().to_string(),
        );
    }

    Ok(outcomes)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::conversion::test_support::{install_script, SPAWN_LOCK};
    use crate::models::{OutputExtension, SimulationMetadata};
    use crate::vtkhdf::fixtures::create_vtkhdf_fixture;

    /// 伪造的 horses2plt：为每个 .hsol 复制模板 VTKHDF 文件，
    /// 文件名含 "bad" 时不打印元数据
    const FAKE_UTILITY: &str = r#"
count=0
for arg in "$@"; do
  case "$arg" in
    *.hsol)
      count=$((count + 1))
      cp "$TEMPLATE" "${arg%.hsol}.hdf"
      case "$arg" in
        *bad*) echo "Converting $arg" ;;
        *) echo " Time: 2.5"; echo " Iteration: 40" ;;
      esac ;;
  esac
done
echo "calls" >> "$CALL_LOG"
echo "files=$count" >> "$CALL_LOG"
"#;

    struct Case {
        root: tempfile::TempDir,
        _guard: std::sync::MutexGuard<'static, ()>,
    }

    impl Case {
        /// 持有 SPAWN_LOCK 直到用例结束
        fn new(solutions: &[&str]) -> Self {
            let guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let root = tempfile::tempdir().unwrap();
            let base = root.path();
            for dir in ["solver/Solver/bin", "sol", "mesh"] {
                fs::create_dir_all(base.join(dir)).unwrap();
            }
            create_vtkhdf_fixture(&base.join("template.hdf")).unwrap();

            let body = FAKE_UTILITY
                .replace("$TEMPLATE", &base.join("template.hdf").display().to_string())
                .replace("$CALL_LOG", &base.join("calls.log").display().to_string());
            install_script(&base.join("solver/Solver/bin"), &body);

            for name in solutions {
                fs::write(base.join("sol").join(name), b"hsol").unwrap();
            }
            fs::write(base.join("mesh/cylinder.hmesh"), b"hmesh").unwrap();
            Case {
                root,
                _guard: guard,
            }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.root.path().join(rel)
        }

        fn request(&self) -> ConversionRequest {
            ConversionRequest::new(self.path("solver"), self.path("sol"), self.path("mesh"))
        }

        fn calls(&self) -> Vec<String> {
            fs::read_to_string(self.path("calls.log"))
                .unwrap_or_default()
                .lines()
                .filter(|l| l.starts_with("files="))
                .map(str::to_string)
                .collect()
        }
    }

    #[test]
    fn test_missing_solver_path() {
        let case = Case::new(&["a_0001.hsol"]);
        let request = ConversionRequest::new(case.path("nowhere"), case.path("sol"), case.path("mesh"));

        assert!(matches!(run(&request), Err(HandlerError::Configuration(_))));
        assert!(case.calls().is_empty());
    }

    #[test]
    fn test_missing_utility_binary() {
        let case = Case::new(&["a_0001.hsol"]);
        fs::remove_file(case.path("solver/Solver/bin/horses2plt")).unwrap();

        let err = run(&case.request()).unwrap_err();
        assert!(err.to_string().contains("horses2plt utility is not found"));
    }

    #[test]
    fn test_no_solution_files() {
        let case = Case::new(&[]);
        let err = run(&case.request()).unwrap_err();
        assert!(matches!(err, HandlerError::Configuration(_)));
        assert!(err.to_string().contains("No .hsol found"));
        assert!(case.calls().is_empty());
    }

    #[test]
    fn test_no_mesh_file() {
        let case = Case::new(&["a_0001.hsol"]);
        fs::remove_file(case.path("mesh/cylinder.hmesh")).unwrap();

        let err = run(&case.request()).unwrap_err();
        assert!(err.to_string().contains("No .hmesh found"));
        assert!(case.calls().is_empty());
    }

    #[test]
    fn test_output_dir_is_created() {
        let case = Case::new(&["a_0001.hsol"]);
        let request = case.request().with_output_dir(case.path("out/nested"));

        prepare(&request, RunLog::default()).unwrap();
        assert!(case.path("out/nested").is_dir());
    }

    #[test]
    fn test_batch_mode_single_invocation() {
        let case = Case::new(&["a_0001.hsol", "a_0002.hsol", "a_0003.hsol"]);
        let request = case
            .request()
            .with_output_dir(case.path("out"))
            .with_extension(OutputExtension::H5);

        let report = run(&request).unwrap();

        assert_eq!(report.mode, ConversionMode::Batch);
        assert_eq!(case.calls(), vec!["files=3"]);
        assert!(report.outcomes.iter().all(|o| o.metadata.is_none()));
        for stem in ["a_0001", "a_0002", "a_0003"] {
            assert!(case.path(&format!("out/{}.h5", stem)).is_file());
            assert!(!case.path(&format!("sol/{}.hdf", stem)).exists());
        }
    }

    #[test]
    fn test_per_file_mode_writes_metadata() {
        let case = Case::new(&["a_0001.hsol", "a_0002.hsol"]);
        let request = case
            .request()
            .with_metadata(true)
            .with_output_dir(case.path("out"))
            .with_extension(OutputExtension::Both);

        let report = run(&request).unwrap();

        assert_eq!(report.mode, ConversionMode::PerFile);
        assert_eq!(case.calls(), vec!["files=1", "files=1"]);
        assert_eq!(report.placed.len(), 4);
        for outcome in &report.outcomes {
            assert_eq!(outcome.metadata, Some(SimulationMetadata::new(2.5, 40)));
            assert!(outcome.raw_output.contains("Iteration: 40"));
        }
        for placed in &report.placed {
            let meta = vtkhdf::read_metadata(placed).unwrap();
            assert_eq!(meta, SimulationMetadata::new(2.5, 40));
        }
        assert!(case.path("out/hdf/a_0002.hdf").is_file());
        assert!(case.path("out/h5/a_0002.h5").is_file());
    }

    #[test]
    fn test_per_file_failure_names_offending_file() {
        let case = Case::new(&["a_0001.hsol", "b_bad.hsol", "c_0003.hsol"]);
        let request = case
            .request()
            .with_metadata(true)
            .with_output_dir(case.path("out"));

        let err = run(&request).unwrap_err();
        match err {
            HandlerError::FileFailed { file, source } => {
                assert!(file.ends_with("b_bad.hsol"));
                assert!(matches!(*source, HandlerError::FieldNotFound { field: "Time", .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // 没有执行放置
        assert!(!case.path("out/a_0001.hdf").exists());
    }

    #[test]
    fn test_parallel_mode_aggregates_failures() {
        let case = Case::new(&["a_0001.hsol", "b_bad.hsol", "c_0003.hsol", "d_bad.hsol"]);
        let request = case.request().with_metadata(true).with_jobs(3);

        match run(&request).unwrap_err() {
            HandlerError::BatchFailed { failed, total, details } => {
                assert_eq!(failed, 2);
                assert_eq!(total, 4);
                assert!(details.iter().any(|d| d.contains("b_bad.hsol")));
                assert!(details.iter().any(|d| d.contains("d_bad.hsol")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // 并行模式下所有文件都被尝试
        assert_eq!(case.calls().len(), 4);
        assert!(vtkhdf::read_metadata(&case.path("sol/c_0003.hdf")).is_ok());
    }

    /// 与临时目录无关的结果摘要
    #[derive(Debug, PartialEq)]
    struct Snapshot {
        mode: ConversionMode,
        outcomes: Vec<(String, PathBuf, Option<SimulationMetadata>, String)>,
        placed: Vec<PathBuf>,
        on_disk: Vec<(PathBuf, Option<SimulationMetadata>)>,
    }

    fn convert_with_log_flags(write_metadata: bool, summary: bool, full: bool) -> Snapshot {
        let case = Case::new(&["a_0001.hsol", "a_0002.hsol"]);
        let request = case
            .request()
            .with_metadata(write_metadata)
            .with_output_dir(case.path("out"))
            .with_extension(OutputExtension::Both)
            .with_summary_log(summary)
            .with_full_log(full);

        let report = run(&request).unwrap();
        let relative = |p: &Path| p.strip_prefix(case.root.path()).unwrap().to_path_buf();

        let mut on_disk: Vec<(PathBuf, Option<SimulationMetadata>)> =
            walkdir::WalkDir::new(case.path("out"))
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| (relative(e.path()), vtkhdf::read_metadata(e.path()).ok()))
                .collect();
        on_disk.sort_by(|a, b| a.0.cmp(&b.0));

        Snapshot {
            mode: report.mode,
            outcomes: report
                .outcomes
                .iter()
                .map(|o| {
                    (
                        o.file_name(),
                        relative(o.converted_file.as_path()),
                        o.metadata,
                        o.raw_output.clone(),
                    )
                })
                .collect(),
            placed: report.placed.iter().map(|p| relative(p.as_path())).collect(),
            on_disk,
        }
    }

    #[test]
    fn test_log_flags_do_not_change_results() {
        for write_metadata in [true, false] {
            let quiet = convert_with_log_flags(write_metadata, false, false);
            assert_eq!(quiet.placed.len(), 4);
            assert_eq!(quiet.on_disk.len(), 4);

            for (summary, full) in [(true, false), (false, true), (true, true)] {
                let logged = convert_with_log_flags(write_metadata, summary, full);
                assert_eq!(
                    logged, quiet,
                    "metadata={} summary={} full={}",
                    write_metadata, summary, full
                );
            }
        }
    }

    #[test]
    fn test_default_output_dir_keeps_files_in_place() {
        let case = Case::new(&["a_0001.hsol"]);

        let report = run(&case.request().with_metadata(true)).unwrap();

        assert_eq!(report.placed, vec![case.path("sol/a_0001.hdf")]);
        assert_eq!(
            vtkhdf::read_metadata(&report.placed[0]).unwrap().iteration,
            40
        );
    }
}
