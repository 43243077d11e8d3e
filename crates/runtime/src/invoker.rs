//! 任务执行入口

use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use executor_core::time;
use executor_domain::{TaskLogState, TaskParams, TaskResult};
use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::registry::TaskRegistry;
use crate::result_sender::ResultDeliveryQueue;

/// 任务执行器
///
/// 每次执行无论成败都恰好产出一条结果交给回传队列，处理器内部的panic
/// 在此处拦截，不会波及调度循环与其他任务。
#[derive(Clone)]
pub struct TaskInvoker {
    registry: Arc<TaskRegistry>,
    results: Arc<ResultDeliveryQueue>,
    address: String,
}

impl TaskInvoker {
    pub fn new(
        registry: Arc<TaskRegistry>,
        results: Arc<ResultDeliveryQueue>,
        address: String,
    ) -> Self {
        Self {
            registry,
            results,
            address,
        }
    }

    /// 执行一个已释放的任务
    pub async fn invoke(&self, task: TaskParams) {
        let Some(handler) = self.registry.get(&task.method) else {
            warn!(
                "任务处理器不存在: method={}, taskLogId={}",
                task.method, task.task_log_id
            );
            self.results.enqueue(TaskResult {
                task_log_id: task.task_log_id,
                task_id: task.task_id,
                state: TaskLogState::ExecutionFailedNotFound,
                failed_reason: String::new(),
                real_execution_time: 0,
                elapsed_time: 0,
                address: String::new(),
            });
            return;
        };

        let started = time::now_millis();
        debug!(
            "开始执行任务: method={}, taskLogId={}, executionTime={}",
            task.method, task.task_log_id, task.execution_time
        );

        let outcome = AssertUnwindSafe(handler.handle(&task)).catch_unwind().await;
        let elapsed = time::now_millis() - started;

        let (state, failed_reason) = match outcome {
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                let backtrace = Backtrace::force_capture();
                error!(
                    "任务执行异常: method={}, taskLogId={}, msg={}",
                    task.method, task.task_log_id, message
                );
                (
                    TaskLogState::ExecutionFailed,
                    format!("{}\r\n\r\n{}", message, backtrace),
                )
            }
            Ok(None) => {
                error!(
                    "任务处理结果为空: method={}, taskLogId={}",
                    task.method, task.task_log_id
                );
                (
                    TaskLogState::ExecutionFailed,
                    format!(
                        "result is null, please check the return value of the method: {}",
                        task.method
                    ),
                )
            }
            Ok(Some(result)) => {
                if result.is_success() {
                    (TaskLogState::ExecutionSuccess, String::new())
                } else {
                    error!(
                        "任务执行失败: method={}, taskLogId={}, code={}, msg={}",
                        task.method, task.task_log_id, result.code, result.msg
                    );
                    (
                        TaskLogState::ExecutionFailed,
                        format!(
                            "cron job task handler failed, code:{}, msg:{}",
                            result.code, result.msg
                        ),
                    )
                }
            }
        };

        let queued = self.results.enqueue(TaskResult {
            task_log_id: task.task_log_id,
            task_id: task.task_id,
            state,
            failed_reason,
            real_execution_time: started,
            elapsed_time: elapsed,
            address: self.address.clone(),
        });
        debug!(
            "任务执行结束: taskLogId={}, state={:?}, elapsed={}ms, 回传队列长度={}",
            task.task_log_id, state, elapsed, queued
        );
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知异常".to_string()
    }
}
