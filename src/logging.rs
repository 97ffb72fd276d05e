//! # 日志初始化
//!
//! 使用 `tracing-subscriber` 安装全局日志：stderr 紧凑输出，可选写入文件。
//! 设置了合法的 `RUST_LOG` 时覆盖 `--log-level`。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 日志级别来自 `cli::LogLevel`

use crate::cli::LogLevel;
use crate::error::{A3edaError, Result};

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// 日志过滤器：优先使用 `RUST_LOG` 指令，无法解析时退回命令行级别
fn build_filter(env_directives: Option<&str>, level: LogLevel) -> EnvFilter {
    env_directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::from(level).into()))
}

/// 安装全局日志订阅者
pub fn setup_logging(level: LogLevel, log_file: Option<&Path>, ansi: bool) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
            level,
        ))
        .with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|e| A3edaError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

        let file_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true);

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}
