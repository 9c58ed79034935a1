//! # 批量执行器
//!
//! 并行执行逐文件转换任务（`--jobs N`，N > 1 时启用）。
//!
//! ## 功能
//! - 基于 rayon 的有界线程池
//! - 进度条显示
//! - 错误收集与汇总报告：所有文件都会尝试，失败统一返回
//!
//! ## 依赖关系
//! - 被 `conversion/orchestrator.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{HandlerError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug)]
pub enum ProcessResult<T> {
    /// 处理成功
    Success(T),
    /// 处理失败
    Failed(PathBuf, HandlerError),
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功结果（保持输入顺序）
    pub successes: Vec<T>,
    /// 失败详情
    pub failures: Vec<(PathBuf, HandlerError)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        BatchResult {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(value) => self.successes.push(value),
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// 存在失败时转换为 `BatchFailed`
    pub fn into_result(self) -> Result<Vec<T>> {
        if self.failures.is_empty() {
            return Ok(self.successes);
        }
        let total = self.total();
        let details = self
            .failures
            .iter()
            .map(|(path, err)| format!("  {}: {}", path.display(), err))
            .collect();
        Err(HandlerError::BatchFailed {
            failed: self.failures.len(),
            total,
            details,
        })
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器
    ///
    /// `jobs` 为已解析的并行度（见 `ConversionRequest::effective_jobs`），至少为 1。
    pub fn new(jobs: usize) -> Self {
        Self { jobs: jobs.max(1) }
    }

    /// 并行处理文件列表
    pub fn run<F, T>(&self, files: &[PathBuf], processor: F) -> Result<BatchResult<T>>
    where
        F: Fn(&PathBuf) -> Result<T> + Sync + Send,
        T: Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Converting");

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| HandlerError::Configuration(format!("Cannot build thread pool: {}", e)))?;

        let results: Vec<ProcessResult<T>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = match processor(file) {
                        Ok(value) => ProcessResult::Success(value),
                        Err(err) => ProcessResult::Failed(file.clone(), err),
                    };
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_collects_all_results_in_order() {
        let files: Vec<PathBuf> = (0..8).map(|i| PathBuf::from(format!("f{}.hsol", i))).collect();
        let runner = BatchRunner::new(4);

        let result = runner
            .run(&files, |f| Ok(f.display().to_string()))
            .unwrap();

        assert_eq!(result.total(), 8);
        assert_eq!(result.successes[0], "f0.hsol");
        assert_eq!(result.successes[7], "f7.hsol");
        assert_eq!(result.into_result().unwrap().len(), 8);
    }

    #[test]
    fn test_new_keeps_resolved_jobs() {
        assert_eq!(BatchRunner::new(3).jobs, 3);
        assert_eq!(BatchRunner::new(0).jobs, 1);
    }

    #[test]
    fn test_failures_are_aggregated() {
        let files: Vec<PathBuf> = ["ok_1.hsol", "bad_2.hsol", "ok_3.hsol", "bad_4.hsol"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let runner = BatchRunner::new(2);

        let result = runner
            .run(&files, |f| {
                if f.to_string_lossy().starts_with("bad") {
                    Err(HandlerError::EmptyOutput { field: "Time" })
                } else {
                    Ok(())
                }
            })
            .unwrap();

        assert_eq!(result.successes.len(), 2);
        assert_eq!(result.failures.len(), 2);

        match result.into_result() {
            Err(HandlerError::BatchFailed { failed, total, details }) => {
                assert_eq!(failed, 2);
                assert_eq!(total, 4);
                assert!(details.iter().any(|d| d.contains("bad_2.hsol")));
                assert!(details.iter().any(|d| d.contains("bad_4.hsol")));
            }
            other => panic!("unexpected result: {:?}", other.map(|v| v.len())),
        }
    }
}
