//! # run 命令实现
//!
//! 按当前状态批量提交已存在的输入文件。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `parsers/status.rs`, `utils/qqchem.rs`, `utils/output.rs`

use super::display_path;
use crate::cli::run::RunArgs;
use crate::config::{SubmitConfig, SystemConfig};
use crate::error::{A3edaError, Result};
use crate::inputs::calculation_specs;
use crate::models::{Job, StatusCriteria};
use crate::parsers::status::check_job;
use crate::utils::{output, qqchem};

use std::path::{Path, PathBuf};
use std::thread;
use tracing::{info, warn};

/// 执行 run 命令
pub fn execute(args: &RunArgs, config: &SystemConfig, system_dir: &Path) -> Result<()> {
    output::print_header("Submitting Calculations");

    let criteria = StatusCriteria::from(args.criteria);
    let mut queue = Vec::new();

    for spec in calculation_specs(config, system_dir) {
        let job = Job::new(&spec.input);
        let name = display_path(&job.input, system_dir);
        if !job.input.exists() {
            warn!("Input file does not exist: {}", job.input.display());
            output::print_warning(&format!("Input file does not exist: {}", name));
            continue;
        }

        let status = check_job(&job);
        if criteria.matches(status.status) {
            info!("Queueing {} (current: {} - {})", name, status.status, status.detail);
            queue.push(job.input);
        } else {
            output::print_skip(&format!("{} ({} - {})", name, status.status, status.detail));
        }
    }

    let submitted = submit_all(&queue, &config.submit, system_dir)?;

    output::print_separator();
    output::print_done(&format!(
        "Matched {} inputs with criteria '{}', submitted {}",
        queue.len(),
        criteria,
        submitted
    ));
    Ok(())
}

/// 依次提交输入文件，返回成功数量
///
/// 单个作业提交失败只报告不中断；找不到提交命令时立即返回错误。
pub fn submit_all(inputs: &[PathBuf], submit: &SubmitConfig, system_dir: &Path) -> Result<usize> {
    let mut submitted = 0;

    for (i, input) in inputs.iter().enumerate() {
        if i > 0 {
            thread::sleep(qqchem::SUBMIT_PAUSE);
        }
        let name = display_path(input, system_dir);
        match qqchem::submit(input, submit) {
            Ok(stdout) => {
                output::print_success(&format!("Submitted: {} {}", name, stdout));
                submitted += 1;
            }
            Err(e @ A3edaError::CommandNotFound { .. }) => return Err(e),
            Err(e) => output::print_error(&format!("Submission failed for {}: {}", name, e)),
        }
    }

    Ok(submitted)
}
