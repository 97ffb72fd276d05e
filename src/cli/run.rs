//! # run 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use super::Criteria;
use clap::Args;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Submit inputs whose current status matches
    #[arg(short, long, value_enum)]
    pub criteria: Criteria,
}
