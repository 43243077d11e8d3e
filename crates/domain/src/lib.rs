//! 执行器领域模型
//!
//! 定义任务参数、处理结果、任务配置与注册协议等与调度中心交互的数据结构，
//! 不包含任何运行时逻辑。

pub mod options;
pub mod registration;
pub mod task;

pub use options::{ExecutorOptions, ExpiredStrategy, FailureStrategy, RouterStrategy, TaskOptions};
pub use registration::{AddressParams, ExecutorRegisterParams, TaskRegisterParams};
pub use task::{HandlerResult, TaskHandler, TaskLogState, TaskParams, TaskResult};
