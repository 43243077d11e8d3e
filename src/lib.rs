//! 分布式定时任务平台执行器SDK
//!
//! 执行器以HTTP服务的形式接收调度中心下发的任务，按计划时间释放执行，
//! 并把执行结果可靠回传。使用方式：
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use cronjob_executor::{
//!     ExecutorClient, ExecutorOptions, HandlerResult, TaskHandler, TaskOptions, TaskParams,
//! };
//!
//! struct DemoTask;
//!
//! #[async_trait]
//! impl TaskHandler for DemoTask {
//!     fn name(&self) -> &str {
//!         "demoTask"
//!     }
//!
//!     async fn handle(&self, _params: &TaskParams) -> Option<HandlerResult> {
//!         Some(HandlerResult::success())
//!     }
//! }
//!
//! # async fn run() -> anyhow::Result<()> {
//! let options = ExecutorOptions {
//!     server_address: "http://127.0.0.1:9527".to_string(),
//!     tenant: "default".to_string(),
//!     app_name: "demo".to_string(),
//!     app_desc: "示例执行器".to_string(),
//!     tag: String::new(),
//!     sign_key: "demo-sign-key".to_string(),
//! };
//! let mut client = ExecutorClient::new(options)?;
//! client.add_task(Arc::new(DemoTask), TaskOptions::new("示例任务", "0 */5 * * * ?"))?;
//! let executor = client.start().await?;
//! executor.run_until_shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod logging;

pub use client::{ExecutorClient, RunningExecutor};
pub use executor_core::{AgentContext, ExecutorError, ExecutorResult, MsgObject};
pub use executor_domain::{
    ExecutorOptions, ExpiredStrategy, FailureStrategy, HandlerResult, RouterStrategy,
    TaskHandler, TaskLogState, TaskOptions, TaskParams, TaskResult,
};
pub use logging::init_logging;
