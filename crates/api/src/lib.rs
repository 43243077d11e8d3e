//! 执行器入站HTTP服务
//!
//! 暴露调度中心调用的 `/dispatch` 任务分发接口，并挂载请求日志、
//! 跨域、异常恢复和响应归一化中间件。调度中心只认HTTP 200加统一
//! JSON信封，所有异常路径都在中间件层收敛到这个形态。

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use middleware::{cors_layer, handle_panic, normalize_response, request_logging, trace_layer};
pub use routes::{create_routes, AppState};
pub use server::{bind_listener, serve, DEFAULT_PORT};

/// 创建完整的入站HTTP应用
pub fn create_app(state: AppState) -> Router {
    create_routes(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(cors_layer())
            .layer(axum::middleware::from_fn(request_logging))
            .layer(axum::middleware::from_fn(normalize_response))
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}
