//! 与调度中心交互的统一响应封装
//!
//! 无论业务成败，HTTP状态码恒为200，业务结果由 `code` 字段表达。

use serde::{Deserialize, Serialize};

/// 成功
pub const SUCCESS: i32 = 0;
/// 非法请求（签名校验失败）
pub const INVALID_REQUEST: i32 = 6;
/// 执行器已进入停机流程，不再接收新任务
pub const EXECUTOR_CLOSED: i32 = 15;
/// 通用失败
pub const ERROR: i32 = 1000;
/// 参数错误
pub const PARAM_ERROR: i32 = 1001;

/// 统一响应体
///
/// `data` 字段始终参与序列化，无数据时输出 `null`，与调度中心的约定保持一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgObject {
    pub code: i32,
    pub msg: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl MsgObject {
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }

    /// 成功响应，msg为空串
    pub fn success() -> Self {
        Self::new(SUCCESS, "")
    }

    /// 签名校验失败
    pub fn invalid_request() -> Self {
        Self::new(INVALID_REQUEST, "非法请求！")
    }

    /// 执行器已关闭，拒绝新任务
    pub fn executor_closed() -> Self {
        Self::new(EXECUTOR_CLOSED, "执行器已关闭")
    }

    /// 通用失败
    pub fn error() -> Self {
        Self::new(ERROR, "操作失败")
    }

    /// 参数错误
    pub fn param_error() -> Self {
        Self::new(PARAM_ERROR, "参数错误")
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serializes_null_data() {
        let body = serde_json::to_string(&MsgObject::success()).unwrap();
        assert_eq!(body, r#"{"code":0,"msg":"","data":null}"#);
    }

    #[test]
    fn test_deserialize_without_data_field() {
        let msg: MsgObject = serde_json::from_str(r#"{"code":0,"msg":"ok"}"#).unwrap();
        assert!(msg.is_success());
        assert!(msg.data.is_none());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MsgObject::invalid_request().code, 6);
        assert_eq!(MsgObject::executor_closed().code, 15);
        assert_eq!(MsgObject::error().code, 1000);
        assert_eq!(MsgObject::param_error().code, 1001);
        assert!(!MsgObject::error().is_success());
    }
}
