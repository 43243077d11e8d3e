//! 执行器核心基础模块
//!
//! 提供签名算法、协议封装、运行期上下文等与具体任务无关的基础能力，
//! 供上层的运行时与HTTP接入层复用。

pub mod context;
pub mod errors;
pub mod net;
pub mod protocol;
pub mod sign;
pub mod time;

pub use context::AgentContext;
pub use errors::{ExecutorError, Result as ExecutorResult};
pub use protocol::MsgObject;

/// SDK版本号，所有发往调度中心的请求在 `SDK-Version` 头中携带
pub const VERSION: &str = "Rust-1.0.0";
