//! 请求签名
//!
//! 执行器与调度中心之间的全部HTTP请求都携带MD5签名，双方使用相同的
//! 密钥独立计算并比对。

use std::collections::BTreeMap;

use md5::{Digest, Md5};

/// 免校验令牌，调度中心未启用令牌机制时固定携带该值
pub const DEFAULT_TOKEN: &str = "not-need-token";

/// 计算请求签名
///
/// 将内置参数 `_signKey_`、`times`、`token`、`rb`（原始请求体）与额外参数
/// 合并，按键名字节序排序后拼接为 `key=value&` 串（每项都带尾部 `&`），
/// 取其MD5并编码为小写十六进制。额外参数与内置键同名时覆盖内置值。
pub fn sign(
    sign_key: &str,
    token: &str,
    times: &str,
    body: &str,
    extra_params: &BTreeMap<String, String>,
) -> String {
    let mut params: BTreeMap<&str, &str> = BTreeMap::new();
    params.insert("_signKey_", sign_key);
    params.insert("times", times);
    params.insert("token", token);
    params.insert("rb", body);
    for (key, value) in extra_params {
        params.insert(key.as_str(), value.as_str());
    }

    let mut plain = String::new();
    for (key, value) in &params {
        plain.push_str(key);
        plain.push('=');
        plain.push_str(value);
        plain.push('&');
    }

    format!("{:x}", Md5::digest(plain.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_extras() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn test_sign_known_value() {
        let signature = sign(
            "demo-key",
            DEFAULT_TOKEN,
            "1700000000000",
            "{\"taskLogId\":1}",
            &no_extras(),
        );
        assert_eq!(signature, "3975e62112980e3f1f0c02ab10bb508c");
    }

    #[test]
    fn test_sign_changes_with_times() {
        // 时间戳参与签名，重放旧时间戳会得到不同的签名
        let signature = sign(
            "demo-key",
            DEFAULT_TOKEN,
            "1700000000001",
            "{\"taskLogId\":1}",
            &no_extras(),
        );
        assert_eq!(signature, "bfe820d4aeeae24457d8562f06758936");
    }

    #[test]
    fn test_sign_changes_with_body() {
        let signature = sign(
            "demo-key",
            DEFAULT_TOKEN,
            "1700000000000",
            "{\"taskLogId\":2}",
            &no_extras(),
        );
        assert_eq!(signature, "b7145a55f6d1923bfd1ad86e8fc7ac2f");
    }

    #[test]
    fn test_sign_with_extra_params() {
        let mut extras = BTreeMap::new();
        extras.insert("a".to_string(), "1".to_string());
        extras.insert("b".to_string(), "2".to_string());
        let signature = sign("k", "t", "1", "", &extras);
        assert_eq!(signature, "ca7113c91158a8e132de44e2f6e30fd2");
    }

    #[test]
    fn test_extra_params_override_builtin() {
        // 额外参数与内置键同名时以额外参数为准
        let mut extras = BTreeMap::new();
        extras.insert("token".to_string(), "x".to_string());
        let signature = sign("k", "t", "1", "", &extras);
        assert_eq!(signature, "44acc8bfebfaef7c33dca287cd429262");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let first = sign("key", "token", "42", "body", &no_extras());
        let second = sign("key", "token", "42", "body", &no_extras());
        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
    }
}
