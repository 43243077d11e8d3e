//! 注册协调器

use std::sync::Arc;
use std::time::Duration;

use executor_core::{AgentContext, VERSION};
use executor_domain::{
    AddressParams, ExecutorOptions, ExecutorRegisterParams, TaskRegisterParams,
};
use tokio::time::interval;
use tracing::{info, warn};

use crate::openapi::OpenApiClient;
use crate::registry::TaskRegistry;

/// 注册周期，首个周期立即触发
const REGISTER_INTERVAL: Duration = Duration::from_secs(30);
/// 注册失败后的重试间隔，以及执行器注册与任务注册之间的间隔
const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// 注册协调器
///
/// 周期性向调度中心上报执行器与任务清单。执行器注册的每次尝试都会刷新
/// 注册标志，心跳循环据此决定是否发送；注册失败固定间隔重试，停机后
/// 立即放弃重试。
pub struct RegistrationCoordinator {
    ctx: Arc<AgentContext>,
    client: Arc<dyn OpenApiClient>,
    executor_params: ExecutorRegisterParams,
    task_params: Vec<TaskRegisterParams>,
    address_params: AddressParams,
}

impl RegistrationCoordinator {
    pub fn new(
        ctx: Arc<AgentContext>,
        client: Arc<dyn OpenApiClient>,
        options: &ExecutorOptions,
        registry: &TaskRegistry,
        address: String,
    ) -> Self {
        let host_name = hostname::get()
            .unwrap_or_else(|_| "unknown".into())
            .to_string_lossy()
            .to_string();
        let executor_params = ExecutorRegisterParams {
            tenant: options.tenant.clone(),
            app_name: options.app_name.clone(),
            app_desc: options.app_desc.clone(),
            host_name,
            tag: options.tag.clone(),
            version: VERSION.to_string(),
            address: address.clone(),
        };
        let task_params = registry
            .snapshot()
            .into_iter()
            .map(|(method, task_options)| TaskRegisterParams {
                app_desc: options.app_desc.clone(),
                app_name: options.app_name.clone(),
                cron: task_options.cron,
                expired_strategy: task_options.expired_strategy,
                expired_time: task_options.expire_time,
                failure_retry_interval: task_options.failure_retry_interval,
                failure_strategy: task_options.failure_strategy,
                max_retry_count: task_options.max_retry_count,
                method,
                name: task_options.name,
                remark: task_options.remark,
                router_strategy: task_options.router_strategy,
                tag: options.tag.clone(),
                tenant: options.tenant.clone(),
                timeout: task_options.timeout,
            })
            .collect();

        Self {
            ctx,
            client,
            executor_params,
            task_params,
            address_params: AddressParams { address },
        }
    }

    /// 注册主循环，每个周期先注册执行器、隔一秒再注册任务清单
    pub async fn run(self: Arc<Self>) {
        let mut register_interval = interval(REGISTER_INTERVAL);
        loop {
            register_interval.tick().await;
            if self.ctx.is_shutdown() {
                break;
            }

            self.register_executor_until_success().await;
            tokio::time::sleep(RETRY_PAUSE).await;
            self.register_tasks_until_success().await;
        }
        info!("注册循环退出");
    }

    /// 注册执行器，失败固定间隔重试直到成功或停机
    ///
    /// 每次尝试的结果都写入注册标志，注册掉线期间心跳随之暂停。
    async fn register_executor_until_success(&self) {
        loop {
            if self.ctx.is_shutdown() {
                warn!("执行器已停机，放弃注册重试");
                return;
            }
            let registered = self
                .client
                .register_executor(&self.executor_params)
                .await
                .is_ok();
            self.ctx.set_registered(registered);
            if registered {
                return;
            }
            tokio::time::sleep(RETRY_PAUSE).await;
        }
    }

    /// 注册任务清单，失败固定间隔重试直到成功或停机
    async fn register_tasks_until_success(&self) {
        loop {
            if self.ctx.is_shutdown() {
                warn!("执行器已停机，放弃任务注册重试");
                return;
            }
            if self.client.register_tasks(&self.task_params).await.is_ok() {
                return;
            }
            tokio::time::sleep(RETRY_PAUSE).await;
        }
    }

    /// 注销执行器
    ///
    /// 先清除注册标志再通知调度中心，保证注销期间不再发出心跳；
    /// 通知失败不阻塞停机，失败详情由客户端记录。
    pub async fn unregister(&self) {
        self.ctx.set_registered(false);
        let _ = self.client.unregister(&self.address_params).await;
    }
}
