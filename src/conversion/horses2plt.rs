//! # horses2plt 调用封装
//!
//! 同步调用 HORSES3D 的 `horses2plt` 工具并捕获其输出。
//!
//! ## 调用形式
//! ```text
//! <solver>/Solver/bin/horses2plt <a.hsol> [<b.hsol> ...] <mesh.hmesh> <flags...>
//! ```
//! 不经过 shell：多文件模式直接传入枚举后的文件列表。
//!
//! ## 依赖关系
//! - 被 `conversion/orchestrator.rs` 调用
//! - 无外部 crate 依赖

use crate::error::{HandlerError, Result};

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// 超时模式下的轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 失败信息中保留的输出长度（字符数）
const FAILURE_EXCERPT_CHARS: usize = 2000;

/// 子进程捕获的输出
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    /// 用于解析的文本：优先 stdout，为空时回退到 stderr
    pub fn text(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

/// horses2plt 调用器
#[derive(Debug, Clone)]
pub struct Horses2Plt {
    binary: PathBuf,
    parameters: Vec<String>,
    timeout: Option<Duration>,
}

impl Horses2Plt {
    pub fn new(binary: impl Into<PathBuf>, parameters: Vec<String>) -> Self {
        Horses2Plt {
            binary: binary.into(),
            parameters,
            timeout: None,
        }
    }

    /// 设置单次调用超时（None 表示无限等待）
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// 对一个或多个解文件执行转换，阻塞直到子进程退出
    pub fn run(&self, solutions: &[PathBuf], mesh: &Path) -> Result<CapturedOutput> {
        let command = self.label();

        let child = Command::new(&self.binary)
            .args(solutions)
            .arg(mesh)
            .args(&self.parameters)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HandlerError::CommandNotFound {
                command: self.binary.display().to_string(),
                source: e,
            })?;

        let output = match self.timeout {
            None => child
                .wait_with_output()
                .map_err(|e| HandlerError::CommandFailed {
                    command: command.clone(),
                    stderr: e.to_string(),
                })?,
            Some(limit) => wait_with_timeout(child, limit, &command)?,
        };

        let captured = CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            return Err(HandlerError::CommandFailed {
                command: format!("{} ({})", command, output.status),
                stderr: captured
                    .text()
                    .chars()
                    .take(FAILURE_EXCERPT_CHARS)
                    .collect(),
            });
        }

        Ok(captured)
    }

    fn label(&self) -> String {
        self.binary
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.binary.display().to_string())
    }
}

/// 轮询等待子进程，超时则终止
///
/// stdout/stderr 在独立线程中读取，避免管道写满导致子进程阻塞。
fn wait_with_timeout(mut child: Child, limit: Duration, command: &str) -> Result<Output> {
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let started_at = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if started_at.elapsed() >= limit {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(HandlerError::CommandTimeout {
                        command: command.to_string(),
                        limit,
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(HandlerError::CommandFailed {
                    command: command.to_string(),
                    stderr: e.to_string(),
                })
            }
        }
    };

    Ok(Output {
        status,
        stdout: join_reader(stdout_reader, command)?,
        stderr: join_reader(stderr_reader, command)?,
    })
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_reader(
    reader: Option<thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    command: &str,
) -> Result<Vec<u8>> {
    let Some(handle) = reader else {
        return Ok(Vec::new());
    };
    let failed = |reason: String| HandlerError::CommandFailed {
        command: command.to_string(),
        stderr: reason,
    };
    handle
        .join()
        .map_err(|_| failed("output reader thread panicked".to_string()))?
        .map_err(|e| failed(e.to_string()))
}
