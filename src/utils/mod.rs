//! # 工具函数模块
//!
//! 提供美化输出、进度条与作业提交等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `inputs/` 使用
//! - 子模块: output, progress, qqchem

pub mod output;
pub mod progress;
pub mod qqchem;
