//! 任务模型与处理器接口

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 调度中心下发的任务参数
///
/// 字段与调度协议一一对应，调度中心未下发的字段取零值。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskParams {
    /// 页码，分片任务下发时使用
    pub page: i32,
    /// 总页数
    pub total: i32,
    /// 任务日志ID
    pub task_log_id: i64,
    /// 任务ID
    pub task_id: i64,
    /// 任务方法标识，对应注册表中的键
    pub method: String,
    /// 执行类型，0常规调度，1管理后台立即执行，2过期补偿执行
    pub exe_type: i32,
    /// CRON表达式
    pub cron: String,
    /// 任务标签
    pub tag: String,
    /// 计划执行时间，毫秒
    pub execution_time: i64,
    /// 执行器收到调度请求的时间，毫秒，入队前由执行器补写，
    /// 排查问题时可与调度中心记录的调度时间对照
    pub received_dispatcher_time: i64,
    /// 任务自定义参数
    pub params: String,
}

/// 任务处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResult {
    /// 处理结果编码，0为成功
    pub code: i32,
    /// 处理结果描述
    pub msg: String,
}

impl HandlerResult {
    /// 成功
    pub fn success() -> Self {
        Self {
            code: 0,
            msg: "success".to_string(),
        }
    }

    /// 失败
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            code: 1,
            msg: msg.into(),
        }
    }

    /// 是否成功
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// 任务处理器接口
///
/// 返回 `None` 等同于未给出处理结果，会被记为执行失败。
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// 处理器名称，与应用名一起构成注册键
    fn name(&self) -> &str;

    /// 任务处理方法
    async fn handle(&self, params: &TaskParams) -> Option<HandlerResult>;
}

/// 任务日志状态
///
/// 执行器只会产生 `ExecutionSuccess`、`ExecutionFailed`、
/// `ExecutionFailedNotFound` 三种状态，其余状态由调度中心维护。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum TaskLogState {
    /// 初始化
    Initialize = 1,
    /// 队列中
    Queueing = 2,
    /// 调度中
    Execution = 3,
    /// 执行成功
    ExecutionSuccess = 4,
    /// 执行失败
    ExecutionFailed = 5,
    /// 取消执行
    ExecutionCancel = 6,
    /// 任务过期，超过执行时间而未被调度
    ExecutionExpired = 7,
    /// 执行失败，已丢弃
    ExecutionFailedDiscard = 8,
    /// 执行失败，重试中
    ExecutionFailedRetrying = 9,
    /// 执行失败，未找到执行方法
    ExecutionFailedNotFound = 10,
}

impl From<TaskLogState> for i32 {
    fn from(state: TaskLogState) -> Self {
        state as i32
    }
}

impl TryFrom<i32> for TaskLogState {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Initialize),
            2 => Ok(Self::Queueing),
            3 => Ok(Self::Execution),
            4 => Ok(Self::ExecutionSuccess),
            5 => Ok(Self::ExecutionFailed),
            6 => Ok(Self::ExecutionCancel),
            7 => Ok(Self::ExecutionExpired),
            8 => Ok(Self::ExecutionFailedDiscard),
            9 => Ok(Self::ExecutionFailedRetrying),
            10 => Ok(Self::ExecutionFailedNotFound),
            other => Err(format!("未知的任务状态: {}", other)),
        }
    }
}

/// 任务执行结果，回传给调度中心
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    /// 任务日志ID
    pub task_log_id: i64,
    /// 任务ID
    pub task_id: i64,
    /// 任务状态
    pub state: TaskLogState,
    /// 失败原因，成功时为空串
    pub failed_reason: String,
    /// 实际开始执行时间，毫秒
    pub real_execution_time: i64,
    /// 执行耗时，毫秒
    pub elapsed_time: i64,
    /// 执行器地址
    pub address: String,
}
