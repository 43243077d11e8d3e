//! 执行器示例程序
//!
//! 从TOML配置加载执行器参数，注册两个示例任务后启动，
//! 收到退出信号时优雅停机。

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Arg, Command};
use cronjob_executor::{
    init_logging, ExecutorClient, ExecutorOptions, HandlerResult, TaskHandler, TaskOptions,
    TaskParams,
};
use serde::Deserialize;
use tracing::info;

/// 示例配置文件结构
#[derive(Debug, Deserialize)]
struct DemoConfig {
    executor: ExecutorOptions,
}

/// 示例任务，打印参数后返回成功
struct DemoTask;

#[async_trait]
impl TaskHandler for DemoTask {
    fn name(&self) -> &str {
        "demoTask"
    }

    async fn handle(&self, params: &TaskParams) -> Option<HandlerResult> {
        info!(
            "示例任务执行, taskLogId: {}, params: {}",
            params.task_log_id, params.params
        );
        Some(HandlerResult::success())
    }
}

/// 示例失败任务，演示失败结果的回传与平台侧的失败重试
struct DemoFailTask;

#[async_trait]
impl TaskHandler for DemoFailTask {
    fn name(&self) -> &str {
        "demoFailTask"
    }

    async fn handle(&self, _params: &TaskParams) -> Option<HandlerResult> {
        Some(HandlerResult::failed("演示失败场景"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("executor-demo")
        .version("1.0.0")
        .about("分布式定时任务平台执行器示例")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径")
                .default_value("config/executor.toml"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("日志级别")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .default_value("info"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("日志格式")
                .value_parser(["json", "pretty"])
                .default_value("pretty"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();
    let log_level = matches.get_one::<String>("log-level").unwrap();
    let log_format = matches.get_one::<String>("log-format").unwrap();

    init_logging(log_level, log_format)?;

    info!("启动执行器示例");
    info!("配置文件: {config_path}");

    let raw = std::fs::read_to_string(config_path)
        .with_context(|| format!("读取配置文件失败: {config_path}"))?;
    let config: DemoConfig =
        toml::from_str(&raw).with_context(|| format!("解析配置文件失败: {config_path}"))?;

    let mut client = ExecutorClient::new(config.executor)?;
    client.add_task(
        Arc::new(DemoTask),
        TaskOptions::new("示例任务", "0 0/5 * * * ?"),
    )?;
    client.add_task(
        Arc::new(DemoFailTask),
        TaskOptions::new("示例失败任务", "0 0/10 * * * ?"),
    )?;

    let executor = client.start().await?;
    info!("执行器已启动, address: {}", executor.address());

    executor.run_until_shutdown().await;
    info!("执行器已退出");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_config_parses_executor_section() {
        let raw = r#"
            [executor]
            server_address = "http://127.0.0.1:9527"
            tenant = "default"
            app_name = "demo"
            app_desc = "示例执行器"
            tag = ""
            sign_key = "4f7a52b8c6154d2bb9071f95e3c40a1d"
        "#;
        let config: DemoConfig = toml::from_str(raw).unwrap();
        let mut options = config.executor;
        assert_eq!(options.server_address, "http://127.0.0.1:9527");
        assert_eq!(options.app_name, "demo");

        options.validate().unwrap();
        // 空标签回填为默认分组
        assert_eq!(options.tag, "common");
    }
}
