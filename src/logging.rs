//! 日志初始化

use executor_core::errors::Result;
use executor_core::ExecutorError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志系统
///
/// `RUST_LOG` 环境变量优先于 `log_level` 参数，`log_format` 支持
/// `json` 和 `pretty` 两种输出。进程内重复初始化会返回错误。
pub fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| ExecutorError::Configuration(format!("初始化JSON日志格式失败: {}", e)))?,
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
            .map_err(|e| {
                ExecutorError::Configuration(format!("初始化Pretty日志格式失败: {}", e))
            })?,
        _ => {
            return Err(ExecutorError::Configuration(format!(
                "不支持的日志格式: {}",
                log_format
            )))
        }
    }

    Ok(())
}
