//! # horses2plt 输出解析器
//!
//! 从 horses2plt 的终端输出中提取模拟时间与迭代步。
//!
//! ## 输出格式说明
//! ```text
//! ...
//!    Time: 1.2500000000
//!    Iteration: 4000
//! ...
//! ```
//! 匹配区分大小写，取整个文本中的第一次出现，不限定行首。
//! 时间只接受定点小数：`1.25E-01` 只会捕获 `1.25`，指数部分被忽略。
//! horses2plt 按定点格式打印时间，若输出格式改变需同步修改此处。
//!
//! ## 依赖关系
//! - 被 `conversion/orchestrator.rs` 使用
//! - 使用 `models/outcome.rs`

use crate::error::{HandlerError, Result};
use crate::models::SimulationMetadata;
use regex::Regex;
use std::sync::OnceLock;

/// 错误信息中保留的输出前缀长度（字符数）
const EXCERPT_CHARS: usize = 200;

const TIME_FIELD: &str = "Time";
const ITERATION_FIELD: &str = "Iteration";

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Time:\s+(\d+(?:\.\d*)?)").expect("valid time pattern"))
}

fn iteration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Iteration:\s+(\d+)").expect("valid iteration pattern"))
}

/// 提取模拟时间
pub fn extract_time(output: Option<&str>) -> Result<f64> {
    let raw = capture_field(output, TIME_FIELD, time_pattern())?;
    raw.parse::<f64>().map_err(|e| HandlerError::FieldParse {
        field: TIME_FIELD,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// 提取迭代步
pub fn extract_iteration(output: Option<&str>) -> Result<i64> {
    let raw = capture_field(output, ITERATION_FIELD, iteration_pattern())?;
    raw.parse::<i64>().map_err(|e| HandlerError::FieldParse {
        field: ITERATION_FIELD,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// 同时提取时间与迭代步
pub fn extract_metadata(output: Option<&str>) -> Result<SimulationMetadata> {
    Ok(SimulationMetadata::new(
        extract_time(output)?,
        extract_iteration(output)?,
    ))
}

/// 返回第一个匹配的数字文本
fn capture_field<'a>(output: Option<&'a str>, field: &'static str, pattern: &Regex) -> Result<&'a str> {
    let text = match output {
        Some(t) if !t.is_empty() => t,
        _ => return Err(HandlerError::EmptyOutput { field }),
    };

    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| HandlerError::FieldNotFound {
            field,
            excerpt: text.chars().take(EXCERPT_CHARS).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
 ****************************************
        horses2plt
 ****************************************
   Mesh file: MESH/cylinder.hmesh
   Solution file: RESULTS/cylinder_0000004000.hsol
   Time: 123.456
   Iteration: 42
   Writing VTKHDF file... done
"#;

    #[test]
    fn test_extract_time_valid() {
        let out = "Some logs\nTime: 123.456\nMore logs";
        assert!((extract_time(Some(out)).unwrap() - 123.456).abs() < 1e-12);
        assert!((extract_time(Some(SAMPLE)).unwrap() - 123.456).abs() < 1e-12);
    }

    #[test]
    fn test_extract_time_integer_literal() {
        assert_eq!(extract_time(Some("Time: 7")).unwrap(), 7.0);
    }

    #[test]
    fn test_extract_iteration_valid() {
        assert_eq!(extract_iteration(Some("Start\nIteration: 42\nEnd")).unwrap(), 42);
        assert_eq!(extract_iteration(Some(SAMPLE)).unwrap(), 42);
    }

    #[test]
    fn test_extract_metadata() {
        let meta = extract_metadata(Some(SAMPLE)).unwrap();
        assert_eq!(meta.iteration, 42);
        assert!((meta.time - 123.456).abs() < 1e-12);
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            extract_time(Some("No time here")),
            Err(HandlerError::FieldNotFound { field: "Time", .. })
        ));
        assert!(matches!(
            extract_iteration(Some("No iter")),
            Err(HandlerError::FieldNotFound { field: "Iteration", .. })
        ));
        // 冒号后没有数字
        assert!(matches!(
            extract_time(Some("Time: unknown")),
            Err(HandlerError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_and_absent_output() {
        for input in [None, Some("")] {
            assert!(matches!(
                extract_time(input),
                Err(HandlerError::EmptyOutput { field: "Time" })
            ));
            assert!(matches!(
                extract_iteration(input),
                Err(HandlerError::EmptyOutput { field: "Iteration" })
            ));
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert!(extract_time(Some("time: 1.0")).is_err());
        assert!(extract_iteration(Some("ITERATION: 3")).is_err());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let out = "Time: 1.5\nIteration: 10\nTime: 2.5\nIteration: 20";
        assert_eq!(extract_time(Some(out)).unwrap(), 1.5);
        assert_eq!(extract_iteration(Some(out)).unwrap(), 10);
    }

    #[test]
    fn test_iteration_overflow_is_parse_error() {
        let out = "Iteration: 99999999999999999999999";
        match extract_iteration(Some(out)) {
            Err(HandlerError::FieldParse { field, value, .. }) => {
                assert_eq!(field, "Iteration");
                assert_eq!(value, "99999999999999999999999");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_time_exponent_suffix_is_ignored() {
        assert_eq!(extract_time(Some("Time: 1.25E-01")).unwrap(), 1.25);
    }

    #[test]
    fn test_time_non_ascii_digits_is_parse_error() {
        match extract_time(Some("Time: ١٢٣")) {
            Err(HandlerError::FieldParse { field, value, .. }) => {
                assert_eq!(field, "Time");
                assert_eq!(value, "١٢٣");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_excerpt_truncated() {
        let out = "x".repeat(1000);
        match extract_time(Some(&out)) {
            Err(HandlerError::FieldNotFound { excerpt, .. }) => {
                assert_eq!(excerpt.chars().count(), EXCERPT_CHARS);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
