//! # Q-Chem 作业文件模型
//!
//! 一个作业由输入文件 `<stem>.in` 确定，输出与错误流文件在同一目录。
//!
//! ## 依赖关系
//! - 被 `parsers/status.rs`, `inputs/`, `commands/` 使用

use std::path::{Path, PathBuf};

/// 单个作业的文件集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub error: PathBuf,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        Job {
            output: input.with_extension("out"),
            error: input.with_extension("err"),
            input,
        }
    }

    /// 由 `.out` 文件反推作业
    pub fn from_output(output: &Path) -> Self {
        Job::new(output.with_extension("in"))
    }

    /// 输入文件主名（不含扩展名）
    pub fn stem(&self) -> &str {
        self.input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    pub fn dir(&self) -> &Path {
        self.input.parent().unwrap_or_else(|| Path::new("."))
    }
}
