//! # status 命令实现
//!
//! 按布局顺序列出每个计算的状态并统计。
//!
//! ## 依赖关系
//! - 使用 `parsers/status.rs`, `inputs/layout.rs`
//! - 使用 `tabled` 输出表格

use super::display_path;
use crate::config::SystemConfig;
use crate::error::Result;
use crate::inputs::calculation_specs;
use crate::models::{Job, JobStatus, StatusResult};
use crate::parsers::status::current_status;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 状态表的一行
#[derive(Debug, Clone, Tabled)]
struct StatusRow {
    #[tabled(rename = "Calculation")]
    calculation: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Details")]
    details: String,
}

/// 执行 status 命令
pub fn execute(config: &SystemConfig, system_dir: &Path) -> Result<()> {
    output::print_header("Calculation Status");

    let results: Vec<(String, StatusResult)> = calculation_specs(config, system_dir)
        .into_iter()
        .map(|spec| {
            let job = Job::new(&spec.input);
            (
                display_path(&job.input.with_extension(""), system_dir),
                current_status(&job),
            )
        })
        .collect();

    let rows: Vec<StatusRow> = results
        .iter()
        .map(|(name, r)| StatusRow {
            calculation: name.clone(),
            status: r.status.to_string(),
            details: r.detail.clone(),
        })
        .collect();
    println!("{}", Table::new(&rows));

    output::print_header("Summary");
    for (status, count) in status_counts(results.iter().map(|(_, r)| r.status)) {
        output::print_info(&format!("{:<10} : {:>4} calculations", status.as_str(), count));
    }
    Ok(())
}

/// 按枚举顺序统计出现过的状态
fn status_counts(statuses: impl Iterator<Item = JobStatus>) -> Vec<(JobStatus, usize)> {
    let mut counts = [0usize; JobStatus::ALL.len()];
    for s in statuses {
        if let Some(i) = JobStatus::ALL.iter().position(|x| *x == s) {
            counts[i] += 1;
        }
    }
    JobStatus::ALL
        .iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .map(|(s, n)| (*s, n))
        .collect()
}
