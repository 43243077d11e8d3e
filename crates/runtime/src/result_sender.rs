//! 结果回传循环

use std::sync::Arc;
use std::time::Duration;

use executor_core::AgentContext;
use executor_domain::TaskResult;
use tracing::info;

use crate::openapi::OpenApiClient;
use crate::queue::TimeOrderedQueue;

/// 队列空闲时的轮询间隔
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 结果回传队列
///
/// 按实际执行时间升序回传，失败的结果原样重新入队，不设退避与次数上限。
/// 这是停机流程的收尾环节：即使停机标志已置位，也要等调度循环停止且
/// 队列排空才退出，退出时发出排空通知。
pub struct ResultDeliveryQueue {
    ctx: Arc<AgentContext>,
    queue: TimeOrderedQueue<TaskResult>,
    client: Arc<dyn OpenApiClient>,
}

impl ResultDeliveryQueue {
    pub fn new(ctx: Arc<AgentContext>, client: Arc<dyn OpenApiClient>) -> Self {
        Self {
            ctx,
            queue: TimeOrderedQueue::new(),
            client,
        }
    }

    /// 结果入队，返回入队后的队列长度
    pub fn enqueue(&self, result: TaskResult) -> usize {
        self.queue.push(result.real_execution_time, result)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// 回传主循环
    pub async fn run(self: Arc<Self>) {
        info!("结果回传循环启动");

        // 队列还有结果，或者尚未停机，或者调度循环还没停止
        while !self.queue.is_empty()
            || !self.ctx.is_shutdown()
            || !self.ctx.scheduler_stopped()
        {
            let Some((_, result)) = self.queue.pop() else {
                tokio::time::sleep(IDLE_POLL_INTERVAL).await;
                continue;
            };

            // 回传失败立即重新入队，失败详情由客户端记录
            if self.client.complete_task(&result).await.is_err() {
                self.queue.push(result.real_execution_time, result);
            }
        }

        info!("结果回传队列已排空，回传循环退出");
        self.ctx.signal_drained();
    }
}
