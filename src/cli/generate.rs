//! # generate 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use super::Criteria;
use clap::Args;

/// generate 子命令参数
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Rewrite existing inputs whose current status matches
    #[arg(short, long, value_enum)]
    pub overwrite: Option<Criteria>,

    /// Submit written inputs whose status before writing matches
    #[arg(short, long, value_enum)]
    pub submit: Option<Criteria>,
}
