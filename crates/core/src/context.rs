//! 执行器运行期共享状态
//!
//! 各后台循环（调度、结果回传、注册、心跳）通过同一个上下文感知停机进度，
//! 不依赖任何全局变量。

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use tokio::sync::watch;

const RUNNING: u8 = 0;
const STOPPING: u8 = 1;
const STOPPED: u8 = 2;

/// 执行器生命周期上下文
///
/// - 停机标志：入口在收到停机指令后拒绝新任务
/// - 调度停止标志：调度循环退出并度过静默期后置位
/// - 注册标志：执行器在调度中心的注册状态
/// - 排空通知：结果回传队列清空时触发，停机流程据此收尾
pub struct AgentContext {
    phase: AtomicU8,
    scheduler_stopped: AtomicBool,
    registered: AtomicBool,
    drained_tx: watch::Sender<bool>,
    drained_rx: watch::Receiver<bool>,
}

impl AgentContext {
    pub fn new() -> Self {
        let (drained_tx, drained_rx) = watch::channel(false);
        Self {
            phase: AtomicU8::new(RUNNING),
            scheduler_stopped: AtomicBool::new(false),
            registered: AtomicBool::new(false),
            drained_tx,
            drained_rx,
        }
    }

    /// 是否已发起停机（含停机完成）
    pub fn is_shutdown(&self) -> bool {
        self.phase.load(Ordering::SeqCst) != RUNNING
    }

    /// 进入停机流程，返回是否由本次调用完成状态切换
    pub fn begin_stopping(&self) -> bool {
        self.phase
            .compare_exchange(RUNNING, STOPPING, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// 停机流程收尾完成
    pub fn mark_stopped(&self) {
        self.phase.store(STOPPED, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.phase.load(Ordering::SeqCst) == STOPPED
    }

    /// 调度循环退出后由其自行置位
    pub fn set_scheduler_stopped(&self) {
        self.scheduler_stopped.store(true, Ordering::SeqCst);
    }

    pub fn scheduler_stopped(&self) -> bool {
        self.scheduler_stopped.load(Ordering::SeqCst)
    }

    pub fn set_registered(&self, registered: bool) {
        self.registered.store(registered, Ordering::SeqCst);
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    /// 结果回传队列已清空，重复调用无副作用
    pub fn signal_drained(&self) {
        let _ = self.drained_tx.send(true);
    }

    /// 等待结果回传队列清空
    pub async fn wait_drained(&self) {
        let mut rx = self.drained_rx.clone();
        let _ = rx.wait_for(|drained| *drained).await;
    }
}

impl Default for AgentContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_begin_stopping_wins_once() {
        let ctx = AgentContext::new();
        assert!(!ctx.is_shutdown());
        assert!(ctx.begin_stopping());
        // 第二次调用不再赢得状态切换
        assert!(!ctx.begin_stopping());
        assert!(ctx.is_shutdown());
        assert!(!ctx.is_stopped());

        ctx.mark_stopped();
        assert!(ctx.is_stopped());
        assert!(ctx.is_shutdown());
    }

    #[tokio::test]
    async fn test_wait_drained_returns_after_signal() {
        let ctx = Arc::new(AgentContext::new());

        let waiter = {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                ctx.wait_drained().await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        ctx.signal_drained();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("排空通知后等待方应立即返回")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_drained_after_signal_is_immediate() {
        let ctx = AgentContext::new();
        ctx.signal_drained();
        tokio::time::timeout(Duration::from_millis(100), ctx.wait_drained())
            .await
            .expect("已排空时等待应立即返回");
    }

    #[test]
    fn test_flags_default_false() {
        let ctx = AgentContext::new();
        assert!(!ctx.scheduler_stopped());
        assert!(!ctx.is_registered());

        ctx.set_scheduler_stopped();
        ctx.set_registered(true);
        assert!(ctx.scheduler_stopped());
        assert!(ctx.is_registered());

        ctx.set_registered(false);
        assert!(!ctx.is_registered());
    }
}
