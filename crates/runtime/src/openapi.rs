//! 调度中心OpenAPI客户端

use async_trait::async_trait;
use executor_core::errors::Result;
use executor_domain::{AddressParams, ExecutorRegisterParams, TaskRegisterParams, TaskResult};
use tracing::{debug, error, info};

use crate::http::SignedHttpClient;

/// 执行器注册接口
pub const EXECUTOR_REGISTER_PATH: &str = "/openapi/executor/register";
/// 执行器注销接口
pub const EXECUTOR_UNREGISTER_PATH: &str = "/openapi/executor/unregister";
/// 执行器心跳接口
pub const EXECUTOR_HEARTBEAT_PATH: &str = "/openapi/executor/heartbeat";
/// 任务注册接口
pub const TASK_REGISTER_PATH: &str = "/openapi/task/register";
/// 任务结果回传接口
pub const TASK_COMPLETE_PATH: &str = "/openapi/task/complete";

/// 调度中心OpenAPI接口
///
/// 后台循环只依赖该接口，测试中以内存实现替换。
#[async_trait]
pub trait OpenApiClient: Send + Sync {
    /// 注册执行器
    async fn register_executor(&self, params: &ExecutorRegisterParams) -> Result<()>;

    /// 注册任务清单
    async fn register_tasks(&self, params: &[TaskRegisterParams]) -> Result<()>;

    /// 发送心跳
    async fn heartbeat(&self, params: &AddressParams) -> Result<()>;

    /// 注销执行器
    async fn unregister(&self, params: &AddressParams) -> Result<()>;

    /// 回传任务执行结果
    async fn complete_task(&self, result: &TaskResult) -> Result<()>;
}

/// 基于签名HTTP客户端的OpenAPI实现
pub struct OpenApiHttpClient {
    http: SignedHttpClient,
}

impl OpenApiHttpClient {
    pub fn new(http: SignedHttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl OpenApiClient for OpenApiHttpClient {
    async fn register_executor(&self, params: &ExecutorRegisterParams) -> Result<()> {
        match self.http.post_json(EXECUTOR_REGISTER_PATH, params).await {
            Ok(_) => {
                debug!("执行器注册成功: address={}", params.address);
                Ok(())
            }
            Err(e) => {
                error!("执行器注册失败: address={}, {}", params.address, e);
                Err(e)
            }
        }
    }

    async fn register_tasks(&self, params: &[TaskRegisterParams]) -> Result<()> {
        match self.http.post_json(TASK_REGISTER_PATH, &params).await {
            Ok(_) => {
                debug!("任务注册成功: count={}", params.len());
                Ok(())
            }
            Err(e) => {
                error!("任务注册失败: count={}, {}", params.len(), e);
                Err(e)
            }
        }
    }

    async fn heartbeat(&self, params: &AddressParams) -> Result<()> {
        match self.http.post_json(EXECUTOR_HEARTBEAT_PATH, params).await {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("心跳发送失败: address={}, {}", params.address, e);
                Err(e)
            }
        }
    }

    async fn unregister(&self, params: &AddressParams) -> Result<()> {
        match self.http.post_json(EXECUTOR_UNREGISTER_PATH, params).await {
            Ok(_) => {
                info!("执行器注销成功: address={}", params.address);
                Ok(())
            }
            Err(e) => {
                error!("执行器注销失败: address={}, {}", params.address, e);
                Err(e)
            }
        }
    }

    async fn complete_task(&self, result: &TaskResult) -> Result<()> {
        match self.http.post_json(TASK_COMPLETE_PATH, result).await {
            Ok(_) => {
                debug!(
                    "任务结果回传成功: taskLogId={}, state={:?}",
                    result.task_log_id, result.state
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    "任务结果回传失败: taskLogId={}, {}",
                    result.task_log_id, e
                );
                Err(e)
            }
        }
    }
}
