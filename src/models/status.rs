//! # 作业状态数据模型
//!
//! 状态分类器的输出：固定的状态枚举加一段可读说明。
//! 每次查询都从当前文件内容重新计算，不做缓存。
//!
//! ## 依赖关系
//! - 被 `parsers/status.rs` 生成
//! - 被 `commands/` 用于报告与筛选

/// 作业状态
///
/// 对外显示的字符串固定为
/// `absent, nofile, running, SUCCESSFUL, CRASH, terminated, empty, error`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Absent,
    NoFile,
    Running,
    Successful,
    Crash,
    Terminated,
    Empty,
    Error,
}

impl JobStatus {
    /// 报告中的排列顺序
    pub const ALL: [JobStatus; 8] = [
        JobStatus::Absent,
        JobStatus::NoFile,
        JobStatus::Running,
        JobStatus::Successful,
        JobStatus::Crash,
        JobStatus::Terminated,
        JobStatus::Empty,
        JobStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Absent => "absent",
            JobStatus::NoFile => "nofile",
            JobStatus::Running => "running",
            JobStatus::Successful => "SUCCESSFUL",
            JobStatus::Crash => "CRASH",
            JobStatus::Terminated => "terminated",
            JobStatus::Empty => "empty",
            JobStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次状态查询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResult {
    pub status: JobStatus,
    pub detail: String,
}

impl StatusResult {
    pub fn new(status: JobStatus, detail: impl Into<String>) -> Self {
        StatusResult {
            status,
            detail: detail.into(),
        }
    }
}

/// 按状态筛选作业（覆盖、提交、提取时使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCriteria {
    All,
    Only(JobStatus),
}

impl StatusCriteria {
    pub fn matches(&self, status: JobStatus) -> bool {
        match self {
            StatusCriteria::All => true,
            StatusCriteria::Only(s) => *s == status,
        }
    }
}

impl std::fmt::Display for StatusCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCriteria::All => f.write_str("all"),
            StatusCriteria::Only(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_matches() {
        assert!(StatusCriteria::All.matches(JobStatus::Crash));
        assert!(StatusCriteria::Only(JobStatus::Crash).matches(JobStatus::Crash));
        assert!(!StatusCriteria::Only(JobStatus::Crash).matches(JobStatus::Successful));
    }

    #[test]
    fn test_status_display_strings() {
        let shown: Vec<String> = JobStatus::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            shown,
            vec![
                "absent",
                "nofile",
                "running",
                "SUCCESSFUL",
                "CRASH",
                "terminated",
                "empty",
                "error"
            ]
        );
    }
}
