//! # 解析器模块
//!
//! 解释 Q-Chem 产生的文本：作业状态分类与热化学记录提取。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `inputs/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: patterns, qchem_out, status

pub mod patterns;
pub mod qchem_out;
pub mod status;

use std::fs;
use std::path::Path;

use crate::error::{A3edaError, Result};

/// 读取文本文件，非法 UTF-8 字节被替换，去掉末尾空白
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| A3edaError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).trim_end().to_string())
}
