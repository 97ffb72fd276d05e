//! # qqchem 提交工具
//!
//! 把 Q-Chem 输入文件交给集群提交命令：
//! `<command> -c <cores> -t <time> <input>`，在输入文件所在目录执行。
//!
//! ## 依赖关系
//! - 被 `inputs/generator.rs`, `commands/run.rs` 使用
//! - 使用 `config.rs` 的 `SubmitConfig`

use crate::config::SubmitConfig;
use crate::error::{A3edaError, Result};

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tracing::debug;

/// 连续提交之间的间隔
pub const SUBMIT_PAUSE: Duration = Duration::from_millis(200);

/// 提交命令的参数列表（不含命令本身）
pub fn submit_args(input_name: &str, config: &SubmitConfig) -> Vec<String> {
    vec![
        "-c".to_string(),
        config.cores.to_string(),
        "-t".to_string(),
        config.time.clone(),
        input_name.to_string(),
    ]
}

/// 提交单个输入文件，返回提交命令的标准输出
pub fn submit(input: &Path, config: &SubmitConfig) -> Result<String> {
    let input_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            A3edaError::InvalidArgument(format!("bad input path: {}", input.display()))
        })?;
    let workdir = input.parent().unwrap_or_else(|| Path::new("."));
    let args = submit_args(input_name, config);
    let command_line = format!("{} {}", config.command, args.join(" "));
    debug!("Submitting in '{}': {}", workdir.display(), command_line);

    let out = Command::new(&config.command)
        .args(&args)
        .current_dir(workdir)
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => A3edaError::CommandNotFound {
                command: config.command.clone(),
            },
            _ => A3edaError::CommandFailed {
                command: command_line.clone(),
                stderr: e.to_string(),
            },
        })?;

    if !out.status.success() {
        return Err(A3edaError::CommandFailed {
            command: command_line,
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
}
