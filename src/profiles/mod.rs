//! # 能量剖面模块
//!
//! 标签解析、配方组合与 CSV 导出。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `models/`
//! - 子模块: label, composer, export

pub mod composer;
pub mod export;
pub mod label;

pub use composer::{compose, standard_recipes};
pub use label::LabelResolver;
