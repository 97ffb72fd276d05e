//! # 输入生成模块
//!
//! 计算目录布局、模板填充与输入文件写出。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 子模块: layout, template, generator

pub mod generator;
pub mod layout;
pub mod template;

pub use generator::{write_inputs, WriteOutcome};
pub use layout::calculation_specs;
