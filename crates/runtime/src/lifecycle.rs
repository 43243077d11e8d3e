//! 停机协调

use std::sync::Arc;

use executor_core::AgentContext;
use tracing::info;

use crate::register::RegistrationCoordinator;

/// 停机协调器
///
/// 停机分三个阶段：置停机标志并注销执行器、等待结果回传队列排空、
/// 标记停止。已释放执行的任务不会被打断，其结果照常回传；流程只等待
/// 结果送达，不等待任务本身结束。
pub struct ShutdownCoordinator {
    ctx: Arc<AgentContext>,
    registration: Arc<RegistrationCoordinator>,
}

impl ShutdownCoordinator {
    pub fn new(ctx: Arc<AgentContext>, registration: Arc<RegistrationCoordinator>) -> Self {
        Self { ctx, registration }
    }

    /// 执行停机流程，阻塞至结果回传队列排空
    ///
    /// 重复触发只执行一次注销，后续调用同样等待排空完成后返回。
    pub async fn shutdown(&self) {
        if self.ctx.begin_stopping() {
            info!("开始停机: 注销执行器，等待结果回传队列排空");
            self.registration.unregister().await;
            self.ctx.wait_drained().await;
            self.ctx.mark_stopped();
            info!("停机完成");
        } else {
            self.ctx.wait_drained().await;
        }
    }
}
