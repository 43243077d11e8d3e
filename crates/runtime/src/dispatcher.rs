//! 任务调度循环

use std::sync::Arc;
use std::time::Duration;

use executor_core::{time, AgentContext};
use executor_domain::TaskParams;
use tracing::{debug, info};

use crate::invoker::TaskInvoker;
use crate::queue::TimeOrderedQueue;

/// 队列空闲时的轮询间隔
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(200);
/// 循环退出后的静默期，让已释放的任务进入执行
const EXIT_GRACE_PERIOD: Duration = Duration::from_secs(3);

/// 任务调度器
///
/// 以执行时间升序持有任务，到点后释放给独立的执行路径，释放动作不阻塞
/// 循环本身。队首任务未到点时，循环按队首的剩余时间整体休眠：队列按
/// 时间升序出队，队首始终是下一个到点的任务，不需要越过队首向后探查。
pub struct ExecutionScheduler {
    ctx: Arc<AgentContext>,
    queue: TimeOrderedQueue<TaskParams>,
    invoker: TaskInvoker,
}

impl ExecutionScheduler {
    pub fn new(ctx: Arc<AgentContext>, invoker: TaskInvoker) -> Self {
        Self {
            ctx,
            queue: TimeOrderedQueue::new(),
            invoker,
        }
    }

    /// 任务入队，返回入队后的队列长度
    pub fn enqueue(&self, task: TaskParams) -> usize {
        let at = task.execution_time;
        self.queue.push(at, task)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// 调度主循环
    ///
    /// 队列为空且已发起停机时退出；退出前先度过静默期，再置调度停止标志，
    /// 保证最后一批已释放的任务有机会把结果写入回传队列。
    pub async fn run(self: Arc<Self>) {
        info!("任务调度循环启动");

        // 队列还有任务，或者尚未停机
        while !self.queue.is_empty() || !self.ctx.is_shutdown() {
            let Some((execution_time, task)) = self.queue.pop() else {
                tokio::time::sleep(IDLE_POLL_INTERVAL).await;
                continue;
            };

            // 队首未到点，重新入队并等待其剩余时间
            let remaining = execution_time - time::now_millis();
            if remaining > 0 {
                self.queue.push(execution_time, task);
                tokio::time::sleep(Duration::from_millis(remaining as u64)).await;
                continue;
            }

            debug!(
                "释放任务: taskLogId={}, method={}, executionTime={}",
                task.task_log_id, task.method, task.execution_time
            );
            let invoker = self.invoker.clone();
            tokio::spawn(async move {
                invoker.invoke(task).await;
            });
        }

        tokio::time::sleep(EXIT_GRACE_PERIOD).await;
        info!("任务调度循环退出");
        self.ctx.set_scheduler_stopped();
    }
}
