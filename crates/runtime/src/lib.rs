//! 执行器运行时
//!
//! 承载任务调度、任务执行、结果回传、注册与心跳等后台循环，
//! 以及与调度中心交互的签名HTTP客户端。

pub mod dispatcher;
pub mod heartbeat;
pub mod http;
pub mod invoker;
pub mod lifecycle;
pub mod openapi;
pub mod queue;
pub mod register;
pub mod registry;
pub mod result_sender;

pub use dispatcher::ExecutionScheduler;
pub use heartbeat::HeartbeatService;
pub use http::SignedHttpClient;
pub use invoker::TaskInvoker;
pub use lifecycle::ShutdownCoordinator;
pub use openapi::{OpenApiClient, OpenApiHttpClient};
pub use queue::TimeOrderedQueue;
pub use register::RegistrationCoordinator;
pub use registry::TaskRegistry;
pub use result_sender::ResultDeliveryQueue;
