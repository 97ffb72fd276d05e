//! # A3EDA - Q-Chem 催化反应能量分解分析流程
//!
//! 生成催化剂/无催化剂反应路径的 Q-Chem 输入，跟踪作业状态，
//! 并从输出中提取热化学数据组合成能量剖面。
//!
//! ## 子命令
//! - `generate` - 根据模板生成输入文件（可选提交）
//! - `run`      - 按状态提交已有输入
//! - `status`   - 作业状态报告（默认）
//! - `extract`  - 提取数据并生成能量剖面
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── inputs/    (目录布局与模板)
//!   │     ├── parsers/   (状态分类与记录提取)
//!   │     ├── profiles/  (标签解析、剖面组合与导出)
//!   │     ├── batch/     (文件收集与并行执行)
//!   │     └── models/    (数据模型)
//!   ├── config.rs   (体系配置)
//!   ├── logging.rs  (日志初始化)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod inputs;
mod logging;
mod models;
mod parsers;
mod profiles;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = logging::setup_logging(cli.log_level, cli.log_file.as_deref(), !cli.no_color)
    {
        utils::output::print_error(&error_chain(&e));
        std::process::exit(1);
    }

    if let Err(e) = commands::run(&cli) {
        tracing::error!("{}", e);
        utils::output::print_error(&error_chain(&e));
        std::process::exit(1);
    }
}

/// 错误及其来源链
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        msg.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    msg
}
