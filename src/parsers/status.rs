//! # Q-Chem 作业状态分类器
//!
//! 根据输出文件、错误流以及提交残留文件判断作业状态。
//!
//! 规则是一张有序表，按顺序求值，第一条命中的规则决定结果。
//! 多个标记可以同时出现（崩溃日志里也可能有 "terminating"），
//! 顺序不能调整。
//!
//! ## 依赖关系
//! - 被 `commands/status.rs`, `commands/run.rs`, `commands/extract.rs`,
//!   `inputs/generator.rs` 使用
//! - 使用 `models/job.rs`, `models/status.rs`
//! - 使用 `glob` 查找提交残留文件

use crate::models::{Job, JobStatus, StatusResult};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const CANCELLED_MARKER: &str = "CANCELLED AT";
const RUN_ERROR_MARKER: &str = "Error in Q-Chem run";
const ABORTED_MARKER: &str = "Aborted";
const ERROR_OCCURRED_MARKER: &str = "error occurred";
const FATAL_ERROR_MARKER: &str = "Q-Chem fatal error occurred";
const GEOMETRY_FAILED_MARKER: &str = "SGeom Failed";
const SCF_FAILED_MARKER: &str = "SCF failed to converge";
const MEMORY_MARKER: &str = "Insufficient memory";
const STARTED_MARKER: &str = "Running on";
const FINISHED_MARKER: &str = "Thank you very much";

/// 状态判断所需的全部输入
#[derive(Debug, Clone, Default)]
pub struct JobArtifacts {
    /// 输出文件内容；文件不存在时为 `None`
    pub output: Option<String>,
    /// 错误流内容；文件不存在时为空串
    pub error: String,
    /// 同目录下是否存在 `<stem>.in_<n>.<n>` 提交文件
    pub submission_pending: bool,
}

impl JobArtifacts {
    fn output_text(&self) -> &str {
        self.output.as_deref().unwrap_or("")
    }
}

/// 单条分类规则
struct Rule {
    matches: fn(&JobArtifacts) -> bool,
    status: JobStatus,
    detail: fn(&JobArtifacts) -> String,
}

/// 按优先级排列的规则表
const RULES: &[Rule] = &[
    // 队列取消
    Rule {
        matches: |a| a.error.contains(CANCELLED_MARKER),
        status: JobStatus::Terminated,
        detail: |_| "Job cancelled by Queue".to_string(),
    },
    // 错误流指示崩溃
    Rule {
        matches: |a| a.error.contains(RUN_ERROR_MARKER) || a.error.contains(ABORTED_MARKER),
        status: JobStatus::Crash,
        detail: |a| crash_detail(a.output_text()),
    },
    // 已提交但尚未产出
    Rule {
        matches: |a| a.submission_pending,
        status: JobStatus::Running,
        detail: |_| "Job submission file exists".to_string(),
    },
    Rule {
        matches: |a| a.output.is_none(),
        status: JobStatus::NoFile,
        detail: |_| "Output file not found".to_string(),
    },
    Rule {
        matches: |a| {
            let out = a.output_text();
            out.contains(STARTED_MARKER) && !out.contains(FINISHED_MARKER)
        },
        status: JobStatus::Running,
        detail: |_| "Calculation in progress".to_string(),
    },
    Rule {
        matches: |a| a.output_text().contains(FINISHED_MARKER),
        status: JobStatus::Successful,
        detail: |a| format!("Completed in {}", job_time(a.output_text())),
    },
    // 仅输出文件带有致命错误信号
    Rule {
        matches: |a| a.output_text().contains(FATAL_ERROR_MARKER),
        status: JobStatus::Crash,
        detail: |a| fatal_error_message(a.output_text()),
    },
    Rule {
        matches: |a| a.output_text().contains(GEOMETRY_FAILED_MARKER),
        status: JobStatus::Crash,
        detail: |_| "Geometry optimization failed".to_string(),
    },
    Rule {
        matches: |a| a.output_text().contains(SCF_FAILED_MARKER),
        status: JobStatus::Crash,
        detail: |_| "SCF convergence failure".to_string(),
    },
    Rule {
        matches: |a| a.output_text().contains(MEMORY_MARKER),
        status: JobStatus::Crash,
        detail: |_| "Out of memory".to_string(),
    },
    Rule {
        matches: |a| {
            let lower = a.output_text().to_lowercase();
            lower.contains("killed") || lower.contains("terminating")
        },
        status: JobStatus::Terminated,
        detail: |_| "Job terminated unexpectedly".to_string(),
    },
    Rule {
        matches: |a| !a.output_text().trim().is_empty(),
        status: JobStatus::Crash,
        detail: |_| "Unknown failure".to_string(),
    },
];

/// 对已读取的文件内容分类（纯函数）
pub fn classify(artifacts: &JobArtifacts) -> StatusResult {
    RULES
        .iter()
        .find(|rule| (rule.matches)(artifacts))
        .map(|rule| StatusResult::new(rule.status, (rule.detail)(artifacts)))
        .unwrap_or_else(|| StatusResult::new(JobStatus::Empty, "Output file is empty"))
}

/// 读取作业文件并分类
///
/// 读取失败时返回 `error` 状态，不向上传播。
/// 输入文件不存在（`absent`）由调用方在此之前判断。
pub fn check_job(job: &Job) -> StatusResult {
    match read_artifacts(job) {
        Ok(artifacts) => classify(&artifacts),
        Err(e) => StatusResult::new(JobStatus::Error, format!("Error reading output: {}", e)),
    }
}

/// 当前状态：输入文件不存在时为 `absent`，否则走分类器
pub fn current_status(job: &Job) -> StatusResult {
    if !job.input.exists() {
        return StatusResult::new(JobStatus::Absent, "Input file not found");
    }
    check_job(job)
}

fn read_artifacts(job: &Job) -> std::io::Result<JobArtifacts> {
    let output = if job.output.exists() {
        Some(read_lossy(&job.output)?)
    } else {
        None
    };
    let error = if job.error.exists() {
        read_lossy(&job.error)?
    } else {
        String::new()
    };

    Ok(JobArtifacts {
        output,
        error,
        submission_pending: has_submission_file(job.dir(), job.stem()),
    })
}

/// 按 UTF-8 读取，非法字节被替换，去掉末尾空白
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).trim_end().to_string())
}

/// 是否存在 `<stem>.in_[0-9]*.[0-9]*` 形式的提交文件
pub fn has_submission_file(dir: &Path, stem: &str) -> bool {
    let pattern = format!(
        "{}/{}.in_[0-9]*.[0-9]*",
        glob::Pattern::escape(&dir.display().to_string()),
        glob::Pattern::escape(stem)
    );
    match glob::glob(&pattern) {
        Ok(mut paths) => paths.any(|p| p.is_ok()),
        Err(_) => false,
    }
}

/// 错误流指示崩溃时，从输出文本中找出原因
fn crash_detail(output: &str) -> String {
    if output.is_empty() {
        return "Q-Chem execution crashed".to_string();
    }
    if output.contains(ERROR_OCCURRED_MARKER) {
        return error_occurred_message(output);
    }
    if output.contains(GEOMETRY_FAILED_MARKER) {
        return "Geometry optimization failed".to_string();
    }
    if output.contains(SCF_FAILED_MARKER) {
        return "SCF convergence failure".to_string();
    }
    if output.contains(MEMORY_MARKER) {
        return "Out of memory".to_string();
    }
    "Unknown failure".to_string()
}

fn error_occurred_message(output: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    static SPLIT: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?s)error occurred.*?\n\s*(.*?)(?:\n{2,}|\z)").expect("valid regex")
    });
    let split = SPLIT.get_or_init(|| Regex::new(r"[.;]|\band\b").expect("valid regex"));
    first_sentence(output, re, split)
}

fn fatal_error_message(output: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    static SPLIT: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?s)Q-Chem fatal error occurred.*?\n\s*(.*?)(?:\n\n|\z)")
            .expect("valid regex")
    });
    let split = SPLIT.get_or_init(|| Regex::new(r"[.;]").expect("valid regex"));
    first_sentence(output, re, split)
}

/// 取错误标记后的第一段，并截断到第一个句子终止符
fn first_sentence(output: &str, re: &Regex, split: &Regex) -> String {
    match re.captures(output).and_then(|c| c.get(1)) {
        Some(m) => {
            let full = m.as_str().trim();
            split
                .split(full)
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        }
        None => "Unknown fatal error".to_string(),
    }
}

fn job_time(output: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"Total job time:\s*(.*)").expect("valid regex"));
    re.captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
