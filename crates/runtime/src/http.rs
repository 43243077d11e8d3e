//! 带签名的出站HTTP客户端

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use executor_core::errors::{ExecutorError, Result};
use executor_core::{sign, time, MsgObject, VERSION};
use serde::Serialize;
use tracing::warn;

/// 请求超时时间
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// 慢请求阈值，毫秒，超过则记录告警日志
const SLOW_REQUEST_MILLIS: u128 = 200;
/// 出站请求的User-Agent
const USER_AGENT: &str = "CronJob-Rust-SDK";

/// 签名HTTP客户端
///
/// 执行器到调度中心的全部出站请求经由此处：对原始请求体计算签名并附加
/// `sign`/`times`/`token` 头，请求体按签名时的字节原样发送。
/// 重定向不自动跟随，302视为成功状态码。
pub struct SignedHttpClient {
    client: reqwest::Client,
    base_url: String,
    sign_key: String,
}

impl SignedHttpClient {
    pub fn new(base_url: impl Into<String>, sign_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ExecutorError::Network(format!("创建HTTP客户端失败: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            sign_key: sign_key.into(),
        })
    }

    /// 发送POST请求并校验响应
    ///
    /// 传输成功的判定为：状态码属于 {200, 201, 302} 且响应体的业务码为0，
    /// 状态码正常而业务码非零同样视为失败。
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<MsgObject> {
        let payload = serde_json::to_string(body)
            .map_err(|e| ExecutorError::Serialization(format!("序列化请求体失败: {}", e)))?;
        let times = time::now_millis().to_string();
        let signature = sign::sign(
            &self.sign_key,
            sign::DEFAULT_TOKEN,
            &times,
            &payload,
            &BTreeMap::new(),
        );
        let url = format!("{}{}", self.base_url, path);

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json; charset=utf-8")
            .header("SDK-Version", VERSION)
            .header("sign", signature)
            .header("times", &times)
            .header("token", sign::DEFAULT_TOKEN)
            .body(payload)
            .send()
            .await;

        let elapsed = started.elapsed().as_millis();
        if elapsed >= SLOW_REQUEST_MILLIS {
            warn!("请求调度中心耗时过长: url={}, elapsed={}ms", url, elapsed);
        }

        match response {
            Ok(resp) => {
                let status = resp.status().as_u16();
                if !matches!(status, 200 | 201 | 302) {
                    return Err(ExecutorError::Network(format!(
                        "请求调度中心失败: url={}, status={}",
                        url, status
                    )));
                }
                let text = resp
                    .text()
                    .await
                    .map_err(|e| ExecutorError::Network(format!("读取响应体失败: url={}, {}", url, e)))?;
                let msg: MsgObject = serde_json::from_str(&text).map_err(|e| {
                    ExecutorError::Serialization(format!(
                        "解析调度中心响应失败: url={}, body={}, {}",
                        url, text, e
                    ))
                })?;
                if msg.is_success() {
                    Ok(msg)
                } else {
                    Err(ExecutorError::Api {
                        code: msg.code,
                        msg: msg.msg,
                    })
                }
            }
            Err(e) => Err(ExecutorError::Network(format!(
                "请求调度中心失败: url={}, {}",
                url, e
            ))),
        }
    }
}
