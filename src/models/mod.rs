//! # 数据模型模块
//!
//! 定义作业、状态、计算记录与能量剖面的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`profiles/` 和 `commands/` 使用
//! - 子模块: job, status, record, profile

pub mod job;
pub mod profile;
pub mod record;
pub mod status;

pub use job::Job;
pub use profile::{CompositeProfile, PathKind, PathStage, ProfileEntry, Recipe, Stage};
pub use record::{CalculationRecord, FieldValue};
pub use status::{JobStatus, StatusCriteria, StatusResult};
