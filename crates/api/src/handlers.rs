use std::collections::BTreeMap;

use axum::{extract::State, http::HeaderMap, Json};
use executor_core::{sign, time, MsgObject};
use executor_domain::task::TaskParams;
use tracing::{debug, error, warn};

use crate::routes::AppState;

/// 任务分发接口
///
/// 调度中心对请求体签名后下发任务，这里按 签名校验 -> 停机检查 ->
/// 参数解析 的顺序处理，全部通过后补记收到时间并进入执行队列。
pub async fn dispatch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Json<MsgObject> {
    if !verify_sign(&state.sign_key, &headers, &body) {
        return Json(MsgObject::invalid_request());
    }

    if state.ctx.is_shutdown() {
        warn!("收到任务分发请求, 执行器已停机, 忽略任务, params: {}", body);
        return Json(MsgObject::executor_closed());
    }

    let mut task: TaskParams = match serde_json::from_str(&body) {
        Ok(task) => task,
        Err(e) => {
            error!(
                "收到任务分发请求, 参数解析失败, params: {}, err: {}",
                body, e
            );
            return Json(MsgObject::error());
        }
    };
    task.received_dispatcher_time = time::now_millis();

    let queue_size = state.scheduler.enqueue(task);
    debug!(
        "收到任务分发请求, 队列长度: {}, params: {}",
        queue_size, body
    );
    Json(MsgObject::success())
}

/// 用请求体和签名头重算签名并比对，签名头缺失按空字符串参与计算
fn verify_sign(sign_key: &str, headers: &HeaderMap, body: &str) -> bool {
    let request_sign = header_value(headers, "sign");
    let token = header_value(headers, "token");
    let times = header_value(headers, "times");
    let server_sign = sign::sign(sign_key, token, times, body, &BTreeMap::new());
    if server_sign != request_sign {
        error!(
            "收到任务分发请求, 签名校验失败, serverSign: {}, sign: {}, token: {}, times: {}, params: {}",
            server_sign, request_sign, token, times, body
        );
        return false;
    }
    true
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
