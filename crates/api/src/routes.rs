use std::sync::Arc;

use axum::{routing::post, Router};
use executor_core::AgentContext;
use executor_runtime::ExecutionScheduler;

use crate::handlers::dispatch;

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AgentContext>,
    pub scheduler: Arc<ExecutionScheduler>,
    pub sign_key: String,
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 任务分发接口
        .route("/dispatch", post(dispatch))
        .with_state(state)
}
