//! 执行器客户端
//!
//! SDK的统一入口：校验配置、登记任务处理器、启动HTTP服务和全部后台
//! 循环，并提供优雅停机。

use std::sync::Arc;

use executor_api::{bind_listener, create_app, serve, AppState, DEFAULT_PORT};
use executor_core::errors::Result;
use executor_core::{net, AgentContext, ExecutorError};
use executor_domain::{ExecutorOptions, TaskHandler, TaskOptions};
use executor_runtime::{
    ExecutionScheduler, HeartbeatService, OpenApiHttpClient, RegistrationCoordinator,
    ResultDeliveryQueue, ShutdownCoordinator, SignedHttpClient, TaskInvoker, TaskRegistry,
};
use tracing::{info, warn};

/// 执行器客户端
///
/// 先通过 [`ExecutorClient::add_task`] 登记全部任务处理器，再调用
/// [`ExecutorClient::start`] 启动。启动后任务清单不可再变更，调度中心
/// 以注册时上报的清单为准。
pub struct ExecutorClient {
    options: ExecutorOptions,
    registry: TaskRegistry,
}

impl ExecutorClient {
    /// 创建客户端，配置不完整时返回错误
    pub fn new(mut options: ExecutorOptions) -> Result<Self> {
        options.validate()?;
        let registry = TaskRegistry::new(options.app_name.clone());
        Ok(Self { options, registry })
    }

    /// 登记一个任务处理器及其调度配置
    pub fn add_task(
        &mut self,
        handler: Arc<dyn TaskHandler>,
        options: TaskOptions,
    ) -> Result<String> {
        self.registry.register(handler, options)
    }

    /// 启动执行器
    ///
    /// 依次完成：绑定监听端口、确定对外地址、启动HTTP服务、启动调度与
    /// 回传循环、启动注册与心跳循环。返回的句柄用于停机。
    pub async fn start(self) -> Result<RunningExecutor> {
        let ctx = Arc::new(AgentContext::new());

        // 先绑定端口，对外公布的地址由实际绑定的端口决定
        let listener = bind_listener(DEFAULT_PORT).await;
        let port = listener
            .local_addr()
            .map_err(|e| ExecutorError::Network(format!("读取监听地址失败: {}", e)))?
            .port();
        let ip = net::local_ip().unwrap_or_else(|e| {
            warn!("探测本机IP失败, 回退到回环地址, err: {}", e);
            "127.0.0.1".to_string()
        });
        let address = format!("{}:{}", ip, port);

        let http = SignedHttpClient::new(
            self.options.server_address.clone(),
            self.options.sign_key.clone(),
        )?;
        let api_client = Arc::new(OpenApiHttpClient::new(http));

        let registry = Arc::new(self.registry);
        let results = Arc::new(ResultDeliveryQueue::new(ctx.clone(), api_client.clone()));
        let invoker = TaskInvoker::new(registry.clone(), results.clone(), address.clone());
        let scheduler = Arc::new(ExecutionScheduler::new(ctx.clone(), invoker));

        let state = AppState {
            ctx: ctx.clone(),
            scheduler: scheduler.clone(),
            sign_key: self.options.sign_key.clone(),
        };
        tokio::spawn(serve(listener, create_app(state)));

        // 调度与回传循环先行，注册成功后调度中心随时可能派发任务
        tokio::spawn(scheduler.clone().run());
        tokio::spawn(results.run());

        let registration = Arc::new(RegistrationCoordinator::new(
            ctx.clone(),
            api_client.clone(),
            &self.options,
            &registry,
            address.clone(),
        ));
        let heartbeat = Arc::new(HeartbeatService::new(
            ctx.clone(),
            api_client,
            address.clone(),
        ));
        tokio::spawn(registration.clone().run());
        tokio::spawn(heartbeat.run());

        info!(
            "执行器启动成功, address: {}, appName: {}, 任务数: {}",
            address,
            self.options.app_name,
            registry.len()
        );

        Ok(RunningExecutor {
            ctx: ctx.clone(),
            address,
            shutdown: ShutdownCoordinator::new(ctx, registration),
        })
    }
}

/// 已启动的执行器句柄
pub struct RunningExecutor {
    ctx: Arc<AgentContext>,
    address: String,
    shutdown: ShutdownCoordinator,
}

impl RunningExecutor {
    /// 对外公布的执行器地址，`ip:port` 格式
    pub fn address(&self) -> &str {
        &self.address
    }

    /// 是否已进入停机流程
    pub fn is_shutdown(&self) -> bool {
        self.ctx.is_shutdown()
    }

    /// 优雅停机
    ///
    /// 通知调度中心下线，等待执行队列排空、全部结果回传完成后返回。
    /// 重复调用时后续调用等待首次停机完成。
    pub async fn stop(&self) {
        self.shutdown.shutdown().await;
    }

    /// 阻塞等待进程退出信号，收到后执行优雅停机
    pub async fn run_until_shutdown(&self) {
        wait_for_shutdown_signal().await;
        info!("收到关闭信号, 开始优雅停机");
        self.stop().await;
    }
}

/// 等待Ctrl+C或SIGTERM
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("安装Ctrl+C信号处理器失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("安装SIGTERM信号处理器失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("收到Ctrl+C信号");
        },
        _ = terminate => {
            info!("收到SIGTERM信号");
        },
    }
}
