use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use executor_core::MsgObject;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, warn};

/// 慢请求阈值，毫秒
const SLOW_REQUEST_MILLIS: u128 = 200;

/// 请求日志中间件，超过阈值的请求升级为告警日志
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;
    let elapsed = start.elapsed().as_millis();

    if elapsed > SLOW_REQUEST_MILLIS {
        warn!(
            "完成请求处理: {} {} - 状态: {} - 耗时: {}ms",
            method,
            uri,
            response.status(),
            elapsed
        );
    } else {
        debug!(
            "完成请求处理: {} {} - 状态: {} - 耗时: {}ms",
            method,
            uri,
            response.status(),
            elapsed
        );
    }

    response
}

/// 响应归一化中间件
///
/// 非200响应在此改写为HTTP 200加统一信封，原状态码转入信封的code字段。
pub async fn normalize_response(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() == StatusCode::OK {
        return response;
    }

    let code = i32::from(response.status().as_u16());
    Json(MsgObject::new(code, "请求失败")).into_response()
}

/// 请求处理中的panic在此恢复，返回通用错误信封
pub fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知异常".to_string()
    };
    error!("处理请求时发生异常: {}", message);
    (StatusCode::OK, Json(MsgObject::error())).into_response()
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers(Any)
}

pub fn trace_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
}
