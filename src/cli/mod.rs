//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `generate`: 生成 Q-Chem 输入文件（可选提交）
//! - `run`: 按状态提交已有输入
//! - `status`: 作业状态报告（未给出子命令时的默认行为）
//! - `extract`: 提取热化学数据并生成能量剖面
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: generate, run, extract

pub mod extract;
pub mod generate;
pub mod run;

use crate::models::{JobStatus, StatusCriteria};

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// A3EDA - Q-Chem 催化反应能量分解分析流程
#[derive(Parser)]
#[command(name = "a3eda")]
#[command(version)]
#[command(
    about = "Automated analysis of Q-Chem energy decomposition calculations",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the system configuration (TOML)
    pub config: PathBuf,

    /// System directory holding templates and calculation folders
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub system_dir: PathBuf,

    /// Logging level
    #[arg(short, long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Also write log records to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// 配置文件路径；相对路径以体系目录为基准
    pub fn config_path(&self) -> PathBuf {
        if self.config.is_absolute() {
            self.config.clone()
        } else {
            self.system_dir.join(&self.config)
        }
    }
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Generate Q-Chem input files from templates
    Generate(generate::GenerateArgs),

    /// Submit existing input files whose status matches
    Run(run::RunArgs),

    /// Report the status of every calculation
    Status,

    /// Extract thermochemistry and build energy profiles
    Extract(extract::ExtractArgs),
}

/// 日志级别
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// 覆盖/提交时可用的状态条件
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Criteria {
    #[value(name = "all")]
    All,
    #[value(name = "nofile")]
    NoFile,
    #[value(name = "CRASH")]
    Crash,
    #[value(name = "terminated")]
    Terminated,
    #[value(name = "SUCCESSFUL")]
    Successful,
    #[value(name = "running")]
    Running,
}

impl From<Criteria> for StatusCriteria {
    fn from(c: Criteria) -> Self {
        match c {
            Criteria::All => StatusCriteria::All,
            Criteria::NoFile => StatusCriteria::Only(JobStatus::NoFile),
            Criteria::Crash => StatusCriteria::Only(JobStatus::Crash),
            Criteria::Terminated => StatusCriteria::Only(JobStatus::Terminated),
            Criteria::Successful => StatusCriteria::Only(JobStatus::Successful),
            Criteria::Running => StatusCriteria::Only(JobStatus::Running),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_status() {
        let cli = Cli::try_parse_from(["a3eda", "system.toml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config_path(), PathBuf::from("./system.toml"));
        assert_eq!(cli.log_level, LogLevel::Info);
    }

    #[test]
    fn test_parse_generate_with_criteria() {
        let cli = Cli::try_parse_from([
            "a3eda",
            "-C",
            "/data/da",
            "system.toml",
            "generate",
            "--overwrite",
            "CRASH",
            "--submit",
            "all",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(
                    args.overwrite.map(StatusCriteria::from),
                    Some(StatusCriteria::Only(JobStatus::Crash))
                );
                assert_eq!(
                    args.submit.map(StatusCriteria::from),
                    Some(StatusCriteria::All)
                );
            }
            _ => panic!("expected generate"),
        }
        assert!(Cli::try_parse_from(["a3eda", "x.toml", "run", "--criteria", "crash"]).is_err());
    }
}
