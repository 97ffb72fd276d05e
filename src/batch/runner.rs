//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告；单个文件失败不会中断整批
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;
use tracing::warn;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    /// 处理成功
    Success(T),
    /// 跳过（如状态不符）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果，成功时交出结果值
    pub fn merge<T>(&mut self, result: ProcessResult<T>) -> Option<T> {
        match result {
            ProcessResult::Success(value) => {
                self.success += 1;
                Some(value)
            }
            ProcessResult::Skipped(_) => {
                self.skipped += 1;
                None
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
                None
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器；0 表示使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理文件列表，按输入顺序返回成功值
    pub fn run<T, F>(&self, files: Vec<PathBuf>, processor: F) -> (Vec<T>, BatchResult)
    where
        T: Send,
        F: Fn(&PathBuf) -> ProcessResult<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Extracting");

        let process_all = || -> Vec<ProcessResult<T>> {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        };

        // 配置 rayon 线程池；失败时退回全局线程池
        let results = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
        {
            Ok(pool) => pool.install(process_all),
            Err(e) => {
                warn!("Failed to build thread pool ({}), using the global pool", e);
                process_all()
            }
        };

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        let values = results
            .into_iter()
            .filter_map(|r| batch_result.merge(r))
            .collect();

        (values, batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_keeps_order_and_counts() {
        let files: Vec<PathBuf> = ["a.out", "b.out", "c.out", "d.out"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let (values, summary) = BatchRunner::new(2).run(files, |f| {
            let name = f.display().to_string();
            match name.as_str() {
                "b.out" => ProcessResult::Skipped(name),
                "c.out" => ProcessResult::Failed(name, "No energy found".to_string()),
                _ => ProcessResult::Success(name),
            }
        });

        assert_eq!(values, vec!["a.out".to_string(), "d.out".to_string()]);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.failures[0].1, "No energy found");
    }
}
