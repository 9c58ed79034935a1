//! # 美化输出工具
//!
//! 提供统一的终端输出样式，以及转换过程中受两个日志开关控制的输出：
//! - 简要日志：文件数量、逐文件确认行
//! - 完整日志：原样回显 horses2plt 的输出
//!
//! 两个开关互相独立，且不影响流程控制。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `conversion/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;
use indicatif::ProgressBar;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印转换成功消息
pub fn print_conversion(from: &str, to: &str) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        from.dimmed(),
        "->".cyan(),
        to
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 原样打印一段子进程输出
pub fn print_block(title: &str, body: &str) {
    println!("{} {}", "[LOG]".magenta().bold(), title.bold());
    for line in body.lines() {
        println!("    {}", line.dimmed());
    }
}

/// 转换过程日志
///
/// 存在进度条时，输出前先暂停进度条。
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLog<'a> {
    /// 简要日志
    pub summary: bool,
    /// 完整子进程输出
    pub full: bool,
    progress: Option<&'a ProgressBar>,
}

impl<'a> RunLog<'a> {
    pub fn new(summary: bool, full: bool) -> Self {
        RunLog {
            summary,
            full,
            progress: None,
        }
    }

    /// 绑定进度条
    pub fn with_progress(self, progress: &'a ProgressBar) -> RunLog<'a> {
        RunLog {
            progress: Some(progress),
            ..self
        }
    }

    /// 简要信息（数量统计等）
    pub fn info(&self, msg: &str) {
        if self.summary {
            self.emit(|| print_info(msg));
        }
    }

    /// 逐文件确认行
    pub fn converted(&self, from: &str, to: &str) {
        if self.summary {
            self.emit(|| print_conversion(from, to));
        }
    }

    /// 完成汇总
    pub fn success(&self, msg: &str) {
        if self.summary {
            self.emit(|| print_success(msg));
        }
    }

    /// horses2plt 原始输出
    pub fn subprocess(&self, title: &str, body: &str) {
        if self.full {
            self.emit(|| print_block(title, body));
        }
    }

    /// 警告不受日志开关控制
    pub fn warning(&self, msg: &str) {
        self.emit(|| print_warning(msg));
    }

    fn emit<F: FnOnce()>(&self, print: F) {
        match self.progress {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
    }
}
