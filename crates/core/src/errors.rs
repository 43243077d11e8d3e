use thiserror::Error;

/// 执行器错误类型定义
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("无效的任务参数: {0}")]
    InvalidTaskParams(String),

    #[error("网络错误: {0}")]
    Network(String),

    #[error("调度中心响应错误: code={code}, msg={msg}")]
    Api { code: i32, msg: String },

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 统一的Result类型
pub type Result<T> = std::result::Result<T, ExecutorError>;
