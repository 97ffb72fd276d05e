//! # generate 命令实现
//!
//! 生成体系的全部 Q-Chem 输入，可选按写入后状态提交。
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `inputs/generator.rs`, `commands/run.rs`

use super::display_path;
use super::run::submit_all;
use crate::cli::generate::GenerateArgs;
use crate::config::SystemConfig;
use crate::error::Result;
use crate::inputs::{write_inputs, WriteOutcome};
use crate::models::StatusCriteria;
use crate::utils::output;

use std::path::Path;

/// 执行 generate 命令
pub fn execute(args: &GenerateArgs, config: &SystemConfig, system_dir: &Path) -> Result<()> {
    output::print_header("Generating Q-Chem Inputs");

    let overwrite = args.overwrite.map(StatusCriteria::from);
    let submit = args.submit.map(StatusCriteria::from);
    let results = write_inputs(config, system_dir, overwrite)?;

    let mut written = 0;
    let mut to_submit = Vec::new();
    for r in &results {
        let name = display_path(&r.spec.input, system_dir);
        match r.outcome {
            WriteOutcome::Written => {
                written += 1;
                output::print_success(&format!("Wrote {}", name));
                if submit.is_some_and(|c| c.matches(r.status.status)) {
                    to_submit.push(r.spec.input.clone());
                }
            }
            WriteOutcome::Kept => output::print_skip(&format!(
                "{} ({} - {})",
                name, r.prior.status, r.prior.detail
            )),
        }
    }

    let submitted = if to_submit.is_empty() {
        0
    } else {
        submit_all(&to_submit, &config.submit, system_dir)?
    };

    output::print_separator();
    output::print_done(&format!(
        "{} calculations: wrote {}, kept {}, submitted {}",
        results.len(),
        written,
        results.len() - written,
        submitted
    ));
    Ok(())
}
