//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config.rs`, `inputs/`, `parsers/`, `profiles/`, `utils/`
//! - 子模块: generate, run, status, extract

pub mod extract;
pub mod generate;
pub mod run;
pub mod status;

use crate::cli::{Cli, Commands};
use crate::config::SystemConfig;
use crate::error::{A3edaError, Result};

use std::path::Path;

/// 执行命令
pub fn run(cli: &Cli) -> Result<()> {
    if !cli.system_dir.is_dir() {
        return Err(A3edaError::DirectoryNotFound {
            path: cli.system_dir.display().to_string(),
        });
    }
    let config = SystemConfig::load(&cli.config_path())?;
    let system_dir = cli.system_dir.as_path();

    match &cli.command {
        Some(Commands::Generate(args)) => generate::execute(args, &config, system_dir),
        Some(Commands::Run(args)) => run::execute(args, &config, system_dir),
        Some(Commands::Extract(args)) => extract::execute(args, &config, system_dir),
        Some(Commands::Status) | None => status::execute(&config, system_dir),
    }
}

/// 报告中使用的相对路径
fn display_path(path: &Path, system_dir: &Path) -> String {
    crate::batch::relative_label(path, system_dir)
}
