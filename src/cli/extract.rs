//! # extract 子命令 CLI 定义
//!
//! 提取热化学记录并生成能量剖面 CSV
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use crate::models::{JobStatus, StatusCriteria};
use clap::{Args, ValueEnum};

/// 提取时按作业状态筛选
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StatusFilter {
    #[value(name = "all")]
    All,
    #[value(name = "SUCCESSFUL")]
    Successful,
    #[value(name = "running")]
    Running,
    #[value(name = "CRASH")]
    Crash,
    #[value(name = "terminated")]
    Terminated,
    #[value(name = "nofile")]
    NoFile,
    #[value(name = "empty")]
    Empty,
    #[value(name = "error")]
    Error,
}

impl From<StatusFilter> for StatusCriteria {
    fn from(f: StatusFilter) -> Self {
        match f {
            StatusFilter::All => StatusCriteria::All,
            StatusFilter::Successful => StatusCriteria::Only(JobStatus::Successful),
            StatusFilter::Running => StatusCriteria::Only(JobStatus::Running),
            StatusFilter::Crash => StatusCriteria::Only(JobStatus::Crash),
            StatusFilter::Terminated => StatusCriteria::Only(JobStatus::Terminated),
            StatusFilter::NoFile => StatusCriteria::Only(JobStatus::NoFile),
            StatusFilter::Empty => StatusCriteria::Only(JobStatus::Empty),
            StatusFilter::Error => StatusCriteria::Only(JobStatus::Error),
        }
    }
}

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Only extract jobs with this status
    #[arg(short, long, value_enum, default_value_t = StatusFilter::Successful)]
    pub status: StatusFilter,

    /// Number of parallel jobs (0 = all CPUs)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
