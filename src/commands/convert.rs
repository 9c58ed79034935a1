//! # convert 命令实现
//!
//! 把 .hsol 解文件转换为 VTKHDF，可选写入 Time/Iteration 元数据。
//!
//! ## 功能
//! - 打印运行参数
//! - 调用转换流程（逐文件或批量）
//! - 简要日志开启时输出元数据汇总表
//! - 可选导出元数据 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的 ConvertArgs
//! - 使用 `conversion/` 执行转换
//! - 使用 `models/outcome.rs` 的 MetadataRecord 导出

use crate::cli::convert::ConvertArgs;
use crate::conversion::{self, ConversionMode, ConversionReport};
use crate::error::{HandlerError, Result};
use crate::models::{ConversionRequest, MetadataRecord};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 元数据汇总表的一行
#[derive(Debug, Clone, Tabled)]
struct MetadataRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Iteration")]
    iteration: i64,
}

impl From<&MetadataRecord> for MetadataRow {
    fn from(record: &MetadataRecord) -> Self {
        MetadataRow {
            file: record.file.clone(),
            time: format!("{:.6}", record.time),
            iteration: record.iteration,
        }
    }
}

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    let request = args.to_request();
    output::print_header("HORSES3D Solution Conversion");

    if request.summary_log {
        print_settings(&request);
    }

    let report = conversion::run(&request)?;
    let records: Vec<MetadataRecord> = report
        .outcomes
        .iter()
        .filter_map(MetadataRecord::from_outcome)
        .collect();

    if request.summary_log && report.mode == ConversionMode::PerFile {
        print_metadata_table(&records);
    }

    if let Some(ref csv_path) = args.metadata_csv {
        if report.mode == ConversionMode::Batch {
            output::print_warning(
                "--metadata-csv needs --write-metadata; batch mode extracts no metadata",
            );
        } else {
            save_metadata_csv(&records, csv_path)?;
            output::print_success(&format!(
                "Metadata of {} file(s) saved to '{}'",
                records.len(),
                csv_path.display()
            ));
        }
    }

    print_summary(&report, &request);
    Ok(())
}

/// 运行参数
fn print_settings(request: &ConversionRequest) {
    output::print_info(&format!("Solver:     {}", request.solver_path.display()));
    output::print_info(&format!("Solutions:  {}", request.solution_dir.display()));
    output::print_info(&format!("Mesh:       {}", request.mesh_dir.display()));
    output::print_info(&format!("Output:     {}", request.output_dir().display()));
    output::print_info(&format!("Extension:  {}", request.extension));
    output::print_info(&format!(
        "Parameters: {}",
        request.output_parameters().join(" ")
    ));
    if request.write_metadata {
        output::print_info(&format!("Jobs:       {}", request.effective_jobs()));
    }
    if let Some(limit) = request.timeout {
        output::print_info(&format!("Timeout:    {}s", limit.as_secs()));
    }
}

fn print_metadata_table(records: &[MetadataRecord]) {
    if records.is_empty() {
        return;
    }
    output::print_header("Simulation Metadata");
    let rows: Vec<MetadataRow> = records.iter().map(MetadataRow::from).collect();
    println!("{}", Table::new(&rows));
}

fn print_summary(report: &ConversionReport, request: &ConversionRequest) {
    output::print_done(&format!(
        "{} solution file(s) converted in {} mode -> '{}'",
        report.outcomes.len(),
        report.mode,
        request.output_dir().display()
    ));
}

/// 导出元数据 CSV
fn save_metadata_csv(records: &[MetadataRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(|e| HandlerError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_save_metadata_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        let records = vec![
            MetadataRecord {
                file: "case_0001.hsol".to_string(),
                time: 0.5,
                iteration: 100,
            },
            MetadataRecord {
                file: "case_0002.hsol".to_string(),
                time: 1.25,
                iteration: 200,
            },
        ];

        save_metadata_csv(&records, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "file,time,iteration");
        assert_eq!(lines[1], "case_0001.hsol,0.5,100");
        assert_eq!(lines[2], "case_0002.hsol,1.25,200");
    }

    #[test]
    fn test_metadata_row_formatting() {
        let record = MetadataRecord {
            file: "case_0001.hsol".to_string(),
            time: 2.5,
            iteration: 40,
        };
        let row = MetadataRow::from(&record);
        assert_eq!(row.time, "2.500000");
        assert_eq!(row.iteration, 40);
    }
}
