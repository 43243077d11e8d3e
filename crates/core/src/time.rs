use chrono::Utc;

/// 当前Unix毫秒时间戳
///
/// 协议中的所有时间字段（触发时间、执行时间、签名时间戳）均为毫秒值。
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
