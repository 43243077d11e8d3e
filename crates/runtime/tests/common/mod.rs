//! 运行时测试共用的内存Mock与工具
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use executor_core::errors::{ExecutorError, Result};
use executor_core::time;
use executor_domain::{
    AddressParams, ExecutorRegisterParams, HandlerResult, TaskHandler, TaskParams,
    TaskRegisterParams, TaskResult,
};
use executor_runtime::OpenApiClient;
use parking_lot::Mutex;

/// 可编程的内存OpenAPI客户端，记录全部调用
#[derive(Default)]
pub struct MockOpenApi {
    /// 成功回传的结果
    pub completed: Mutex<Vec<TaskResult>>,
    /// 结果回传的总尝试次数（含失败）
    pub complete_attempts: AtomicUsize,
    complete_failures: AtomicUsize,
    /// 执行器注册的总尝试次数（含失败）
    pub executor_registrations: AtomicUsize,
    register_failures: AtomicUsize,
    /// 每次任务注册收到的清单
    pub task_registrations: Mutex<Vec<Vec<TaskRegisterParams>>>,
    pub heartbeats: AtomicUsize,
    pub unregisters: AtomicUsize,
}

impl MockOpenApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 让接下来n次结果回传返回失败
    pub fn fail_next_completes(&self, n: usize) {
        self.complete_failures.store(n, Ordering::SeqCst);
    }

    /// 让接下来n次执行器注册返回失败
    pub fn fail_next_registers(&self, n: usize) {
        self.register_failures.store(n, Ordering::SeqCst);
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl OpenApiClient for MockOpenApi {
    async fn register_executor(&self, _params: &ExecutorRegisterParams) -> Result<()> {
        self.executor_registrations.fetch_add(1, Ordering::SeqCst);
        if Self::take_failure(&self.register_failures) {
            return Err(ExecutorError::Network("模拟注册失败".to_string()));
        }
        Ok(())
    }

    async fn register_tasks(&self, params: &[TaskRegisterParams]) -> Result<()> {
        self.task_registrations.lock().push(params.to_vec());
        Ok(())
    }

    async fn heartbeat(&self, _params: &AddressParams) -> Result<()> {
        self.heartbeats.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn unregister(&self, _params: &AddressParams) -> Result<()> {
        self.unregisters.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn complete_task(&self, result: &TaskResult) -> Result<()> {
        self.complete_attempts.fetch_add(1, Ordering::SeqCst);
        if Self::take_failure(&self.complete_failures) {
            return Err(ExecutorError::Network("模拟回传失败".to_string()));
        }
        self.completed.lock().push(result.clone());
        Ok(())
    }
}

/// 记录每次调用的任务日志ID与调用时刻
#[derive(Default)]
pub struct RecordingHandler {
    pub calls: Mutex<Vec<(i64, i64)>>,
}

#[async_trait]
impl TaskHandler for RecordingHandler {
    fn name(&self) -> &str {
        "recordingTask"
    }

    async fn handle(&self, params: &TaskParams) -> Option<HandlerResult> {
        self.calls
            .lock()
            .push((params.task_log_id, time::now_millis()));
        Some(HandlerResult::success())
    }
}

/// 返回业务失败的处理器
pub struct FailingHandler;

#[async_trait]
impl TaskHandler for FailingHandler {
    fn name(&self) -> &str {
        "failingTask"
    }

    async fn handle(&self, _params: &TaskParams) -> Option<HandlerResult> {
        Some(HandlerResult::failed("数据源不可用"))
    }
}

/// 执行时panic的处理器
pub struct PanicHandler;

#[async_trait]
impl TaskHandler for PanicHandler {
    fn name(&self) -> &str {
        "panicTask"
    }

    async fn handle(&self, _params: &TaskParams) -> Option<HandlerResult> {
        panic!("boom");
    }
}

/// 不给出处理结果的处理器
pub struct SilentHandler;

#[async_trait]
impl TaskHandler for SilentHandler {
    fn name(&self) -> &str {
        "silentTask"
    }

    async fn handle(&self, _params: &TaskParams) -> Option<HandlerResult> {
        None
    }
}

/// 轮询等待条件成立，超时panic
pub async fn wait_until<F: Fn() -> bool>(condition: F, timeout: Duration) {
    let deadline = tokio::time::Instant::now() + timeout;
    while !condition() {
        if tokio::time::Instant::now() >= deadline {
            panic!("等待条件超时");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
